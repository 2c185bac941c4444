use serde::Deserialize;
use skyfare_pricing::PricingConfig;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
    #[serde(default)]
    pub pricing: PricingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_seat_rows")]
    pub default_seat_rows: u32,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    #[serde(default)]
    pub seed_demo_data: bool,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
}

fn default_seat_rows() -> u32 {
    skyfare_core::seat::DEFAULT_SEAT_ROWS
}

fn default_min_password_length() -> usize {
    8
}

fn default_page_size() -> usize {
    20
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Environment overrides, e.g. `SKYFARE__SERVER__PORT=9090`
            .add_source(config::Environment::with_prefix("SKYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_fills_defaults() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 8080

                [auth]
                jwt_secret = "test-secret"
                jwt_expiration_seconds = 3600

                [business_rules]
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().unwrap();

        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.business_rules.default_seat_rows, 30);
        assert_eq!(cfg.business_rules.min_password_length, 8);
        assert!(!cfg.business_rules.seed_demo_data);
        // The pricing schedule defaults to the stock surcharge table.
        assert_eq!(cfg.pricing.occupancy.len(), 2);
        assert_eq!(cfg.pricing.empty_seat_map_capacity, 6);
    }

    #[test]
    fn test_pricing_schedule_is_tunable_from_config() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 8080

                [auth]
                jwt_secret = "test-secret"
                jwt_expiration_seconds = 3600

                [business_rules]

                [pricing]
                empty_seat_map_capacity = 180

                [[pricing.occupancy]]
                below_percent = 30.0
                surcharge = 0.5
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().unwrap();

        assert_eq!(cfg.pricing.empty_seat_map_capacity, 180);
        assert_eq!(cfg.pricing.occupancy.len(), 1);
        assert_eq!(cfg.pricing.occupancy[0].below_percent, 30.0);
        // Untouched sections keep their defaults.
        assert_eq!(cfg.pricing.urgency.len(), 2);
    }
}
