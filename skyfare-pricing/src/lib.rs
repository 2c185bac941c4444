pub mod cabin;
pub mod engine;

pub use cabin::FareClass;
pub use engine::{PricingConfig, PricingEngine, QuoteInputs};
