use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Refunded,
}

/// A confirmed seat on a flight. The priced amount is the quote captured
/// at booking time; re-quoting the same seat later can differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub pnr: String,
    pub user_id: Uuid,
    pub flight_code: String,
    pub passenger_name: String,
    pub seat_label: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub price_amount: i64,
    pub booked_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(
        pnr: String,
        user_id: Uuid,
        flight_code: String,
        passenger_name: String,
        seat_label: String,
        price_amount: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            pnr,
            user_id,
            flight_code,
            passenger_name,
            seat_label,
            status: BookingStatus::Confirmed,
            payment_status: PaymentStatus::Completed,
            price_amount,
            booked_at: now,
            updated_at: now,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_booking_is_confirmed_and_paid() {
        let booking = Booking::new(
            "FL1234AB".to_string(),
            Uuid::new_v4(),
            "AI101".to_string(),
            "Asha Rao".to_string(),
            "12C".to_string(),
            5400,
        );
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_status, PaymentStatus::Completed);
        assert!(!booking.is_cancelled());
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");
        let json = serde_json::to_string(&PaymentStatus::Refunded).unwrap();
        assert_eq!(json, "\"REFUNDED\"");
    }
}
