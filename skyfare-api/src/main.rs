use skyfare_api::{app, state::{AppState, AuthConfig}};
use skyfare_pricing::PricingEngine;
use skyfare_store::{BookingStore, FlightStore, UserStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skyfare_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = skyfare_store::Config::load().expect("Failed to load config");
    tracing::info!("Starting Skyfare API on port {}", config.server.port);

    let flights = Arc::new(FlightStore::new());
    if config.business_rules.seed_demo_data {
        skyfare_store::seed::seed_flights(&flights, config.business_rules.default_seat_rows)
            .await
            .expect("Failed to seed demo flights");
    }

    let app_state = AppState {
        flights,
        bookings: Arc::new(BookingStore::new()),
        users: Arc::new(UserStore::new()),
        pricing: Arc::new(PricingEngine::new(config.pricing.clone())),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        business_rules: config.business_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
