pub mod app_config;
pub mod booking_store;
pub mod flight_store;
pub mod seed;
pub mod user_store;

pub use app_config::Config;
pub use booking_store::BookingStore;
pub use flight_store::{FlightStore, FlightUpdate};
pub use user_store::{User, UserRole, UserStore};

use skyfare_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Flight not found: {0}")]
    FlightNotFound(String),

    #[error("Flight code already exists: {0}")]
    DuplicateFlightCode(String),

    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    #[error("PNR already exists: {0}")]
    DuplicatePnr(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Seat {seat} does not exist on flight {flight}")]
    UnknownSeat { flight: String, seat: String },

    #[error("Seat {seat} on flight {flight} is already booked")]
    SeatUnavailable { flight: String, seat: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}
