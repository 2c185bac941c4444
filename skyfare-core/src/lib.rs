pub mod booking;
pub mod flight;
pub mod pnr;
pub mod seat;

pub use booking::{Booking, BookingStatus, PaymentStatus};
pub use flight::Flight;
pub use seat::{Seat, SeatMap, SeatStatus};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
