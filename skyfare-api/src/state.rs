use skyfare_pricing::PricingEngine;
use skyfare_store::app_config::BusinessRules;
use skyfare_store::{BookingStore, FlightStore, UserStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub flights: Arc<FlightStore>,
    pub bookings: Arc<BookingStore>,
    pub users: Arc<UserStore>,
    pub pricing: Arc<PricingEngine>,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
}
