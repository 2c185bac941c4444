use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::seat::{Seat, SeatMap, SeatStatus};
use crate::{CoreError, CoreResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: Uuid,
    /// Public flight code like "AI101", unique across the fleet.
    pub code: String,
    pub airline: String,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    /// Base fare in whole currency units. Never negative.
    pub base_price: i64,
    pub seats: SeatMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Flight {
    pub fn new(
        code: String,
        airline: String,
        source: String,
        destination: String,
        departure_time: DateTime<Utc>,
        arrival_time: DateTime<Utc>,
        base_price: i64,
        seats: SeatMap,
    ) -> CoreResult<Self> {
        if arrival_time <= departure_time {
            return Err(CoreError::ValidationError(
                "Arrival time must be after departure time".to_string(),
            ));
        }
        if base_price < 0 {
            return Err(CoreError::ValidationError(
                "Base price must not be negative".to_string(),
            ));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            code,
            airline,
            source,
            destination,
            departure_time,
            arrival_time,
            base_price,
            seats,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn available_seats(&self) -> Vec<&str> {
        self.seats
            .iter()
            .filter(|(_, seat)| seat.is_available())
            .map(|(label, _)| label.as_str())
            .collect()
    }

    pub fn available_seat_count(&self) -> usize {
        self.seats.values().filter(|s| s.is_available()).count()
    }

    pub fn booked_seat_count(&self) -> usize {
        self.seats
            .values()
            .filter(|s| s.status == SeatStatus::Booked)
            .count()
    }

    pub fn seat(&self, label: &str) -> Option<&Seat> {
        self.seats.get(label)
    }

    pub fn has_departed(&self, now: DateTime<Utc>) -> bool {
        self.departure_time < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seat::default_layout;
    use chrono::Duration;

    fn base_flight(departure: DateTime<Utc>, arrival: DateTime<Utc>) -> CoreResult<Flight> {
        Flight::new(
            "AI101".to_string(),
            "Air India".to_string(),
            "Mumbai".to_string(),
            "Delhi".to_string(),
            departure,
            arrival,
            4500,
            default_layout(30),
        )
    }

    #[test]
    fn test_new_flight_validates_times() {
        let now = Utc::now();
        let ok = base_flight(now + Duration::hours(24), now + Duration::hours(26));
        assert!(ok.is_ok());

        let bad = base_flight(now + Duration::hours(26), now + Duration::hours(24));
        assert!(matches!(bad, Err(CoreError::ValidationError(_))));

        let equal = base_flight(now + Duration::hours(24), now + Duration::hours(24));
        assert!(equal.is_err());
    }

    #[test]
    fn test_new_flight_rejects_negative_price() {
        let now = Utc::now();
        let flight = Flight::new(
            "AI101".to_string(),
            "Air India".to_string(),
            "Mumbai".to_string(),
            "Delhi".to_string(),
            now + Duration::hours(24),
            now + Duration::hours(26),
            -1,
            default_layout(30),
        );
        assert!(flight.is_err());
    }

    #[test]
    fn test_seat_counting() {
        let now = Utc::now();
        let mut flight =
            base_flight(now + Duration::hours(24), now + Duration::hours(26)).unwrap();
        assert_eq!(flight.available_seat_count(), 180);
        assert_eq!(flight.booked_seat_count(), 0);

        let seat = flight.seats.get_mut("12C").unwrap();
        seat.status = SeatStatus::Booked;
        seat.passenger = Some("Asha Rao".to_string());

        assert_eq!(flight.available_seat_count(), 179);
        assert_eq!(flight.booked_seat_count(), 1);
        assert!(!flight.available_seats().contains(&"12C"));
    }
}
