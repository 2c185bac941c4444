use chrono::{DateTime, NaiveDate, Utc};
use skyfare_core::seat::{Seat, SeatStatus};
use skyfare_core::{CoreError, Flight};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::StoreError;

/// Partial update for a flight's schedule and fare.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct FlightUpdate {
    pub airline: Option<String>,
    pub source: Option<String>,
    pub destination: Option<String>,
    pub departure_time: Option<DateTime<Utc>>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub base_price: Option<i64>,
}

/// In-memory flight inventory keyed by flight code.
///
/// Seat mutation goes through this store so the availability check and
/// the write happen under one lock. That is the only guarantee: a
/// booking remains a single optimistic write with no cross-store
/// transaction.
pub struct FlightStore {
    flights: RwLock<HashMap<String, Flight>>,
}

impl FlightStore {
    pub fn new() -> Self {
        Self {
            flights: RwLock::new(HashMap::new()),
        }
    }

    pub async fn insert(&self, flight: Flight) -> Result<(), StoreError> {
        let mut flights = self.flights.write().await;
        if flights.contains_key(&flight.code) {
            return Err(StoreError::DuplicateFlightCode(flight.code));
        }
        tracing::info!(code = %flight.code, "flight added");
        flights.insert(flight.code.clone(), flight);
        Ok(())
    }

    pub async fn get(&self, code: &str) -> Result<Flight, StoreError> {
        self.flights
            .read()
            .await
            .get(code)
            .cloned()
            .ok_or_else(|| StoreError::FlightNotFound(code.to_string()))
    }

    pub async fn update(&self, code: &str, update: FlightUpdate) -> Result<Flight, StoreError> {
        let mut flights = self.flights.write().await;
        let flight = flights
            .get_mut(code)
            .ok_or_else(|| StoreError::FlightNotFound(code.to_string()))?;

        if let Some(airline) = update.airline {
            flight.airline = airline;
        }
        if let Some(source) = update.source {
            flight.source = source;
        }
        if let Some(destination) = update.destination {
            flight.destination = destination;
        }
        if let Some(departure) = update.departure_time {
            flight.departure_time = departure;
        }
        if let Some(arrival) = update.arrival_time {
            flight.arrival_time = arrival;
        }
        if let Some(price) = update.base_price {
            if price < 0 {
                return Err(StoreError::Core(CoreError::ValidationError(
                    "Base price must not be negative".to_string(),
                )));
            }
            flight.base_price = price;
        }
        if flight.arrival_time <= flight.departure_time {
            return Err(StoreError::Core(CoreError::ValidationError(
                "Arrival time must be after departure time".to_string(),
            )));
        }
        flight.updated_at = Utc::now();
        Ok(flight.clone())
    }

    pub async fn delete(&self, code: &str) -> Result<(), StoreError> {
        let mut flights = self.flights.write().await;
        flights
            .remove(code)
            .map(|_| ())
            .ok_or_else(|| StoreError::FlightNotFound(code.to_string()))
    }

    /// All flights ordered by departure time, with the total count for
    /// pagination.
    pub async fn list(&self, page: usize, per_page: usize) -> (Vec<Flight>, usize) {
        let flights = self.flights.read().await;
        let mut all: Vec<Flight> = flights.values().cloned().collect();
        all.sort_by_key(|f| f.departure_time);
        let total = all.len();
        let start = page.saturating_sub(1).saturating_mul(per_page);
        let items = all.into_iter().skip(start).take(per_page).collect();
        (items, total)
    }

    /// Case-insensitive substring match on source and destination,
    /// departing on the given calendar day, with enough open seats for
    /// the party.
    pub async fn search(
        &self,
        source: &str,
        destination: &str,
        date: NaiveDate,
        passengers: usize,
    ) -> Vec<Flight> {
        let source = source.to_lowercase();
        let destination = destination.to_lowercase();
        let flights = self.flights.read().await;
        let mut matches: Vec<Flight> = flights
            .values()
            .filter(|f| {
                f.source.to_lowercase().contains(&source)
                    && f.destination.to_lowercase().contains(&destination)
                    && f.departure_time.date_naive() == date
                    && f.available_seat_count() >= passengers
            })
            .cloned()
            .collect();
        matches.sort_by_key(|f| f.departure_time);
        matches
    }

    /// Mark a seat booked for a passenger. The seat must exist and be
    /// available; both checks and the write happen under the write lock.
    pub async fn book_seat(
        &self,
        code: &str,
        seat_label: &str,
        passenger: &str,
    ) -> Result<Flight, StoreError> {
        let mut flights = self.flights.write().await;
        let flight = flights
            .get_mut(code)
            .ok_or_else(|| StoreError::FlightNotFound(code.to_string()))?;
        let seat = flight
            .seats
            .get_mut(seat_label)
            .ok_or_else(|| StoreError::UnknownSeat {
                flight: code.to_string(),
                seat: seat_label.to_string(),
            })?;
        if !seat.is_available() {
            return Err(StoreError::SeatUnavailable {
                flight: code.to_string(),
                seat: seat_label.to_string(),
            });
        }
        seat.status = SeatStatus::Booked;
        seat.passenger = Some(passenger.to_string());
        flight.updated_at = Utc::now();
        Ok(flight.clone())
    }

    /// Free a previously booked seat.
    pub async fn release_seat(&self, code: &str, seat_label: &str) -> Result<(), StoreError> {
        let mut flights = self.flights.write().await;
        let flight = flights
            .get_mut(code)
            .ok_or_else(|| StoreError::FlightNotFound(code.to_string()))?;
        let seat = flight
            .seats
            .get_mut(seat_label)
            .ok_or_else(|| StoreError::UnknownSeat {
                flight: code.to_string(),
                seat: seat_label.to_string(),
            })?;
        *seat = Seat::available();
        flight.updated_at = Utc::now();
        Ok(())
    }

    /// Rename the passenger recorded on a booked seat.
    pub async fn rename_passenger(
        &self,
        code: &str,
        seat_label: &str,
        passenger: &str,
    ) -> Result<(), StoreError> {
        let mut flights = self.flights.write().await;
        let flight = flights
            .get_mut(code)
            .ok_or_else(|| StoreError::FlightNotFound(code.to_string()))?;
        let seat = flight
            .seats
            .get_mut(seat_label)
            .ok_or_else(|| StoreError::UnknownSeat {
                flight: code.to_string(),
                seat: seat_label.to_string(),
            })?;
        seat.passenger = Some(passenger.to_string());
        Ok(())
    }
}

impl Default for FlightStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use skyfare_core::seat::default_layout;

    fn flight(code: &str, source: &str, destination: &str, hours_out: i64) -> Flight {
        let now = Utc::now();
        Flight::new(
            code.to_string(),
            "Air India".to_string(),
            source.to_string(),
            destination.to_string(),
            now + Duration::hours(hours_out),
            now + Duration::hours(hours_out + 2),
            4500,
            default_layout(30),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_code() {
        let store = FlightStore::new();
        store.insert(flight("AI101", "Mumbai", "Delhi", 48)).await.unwrap();
        let err = store.insert(flight("AI101", "Pune", "Goa", 72)).await;
        assert!(matches!(err, Err(StoreError::DuplicateFlightCode(_))));
    }

    #[tokio::test]
    async fn test_book_and_release_seat() {
        let store = FlightStore::new();
        store.insert(flight("AI101", "Mumbai", "Delhi", 48)).await.unwrap();

        let updated = store.book_seat("AI101", "12C", "Asha Rao").await.unwrap();
        assert_eq!(updated.available_seat_count(), 179);
        assert_eq!(
            updated.seat("12C").unwrap().passenger.as_deref(),
            Some("Asha Rao")
        );

        // Double-booking the same seat is refused.
        let err = store.book_seat("AI101", "12C", "Ravi Iyer").await;
        assert!(matches!(err, Err(StoreError::SeatUnavailable { .. })));

        // Unknown seats are refused.
        let err = store.book_seat("AI101", "99Z", "Ravi Iyer").await;
        assert!(matches!(err, Err(StoreError::UnknownSeat { .. })));

        store.release_seat("AI101", "12C").await.unwrap();
        let flight = store.get("AI101").await.unwrap();
        assert!(flight.seat("12C").unwrap().is_available());
        assert!(flight.seat("12C").unwrap().passenger.is_none());
    }

    #[tokio::test]
    async fn test_search_filters() {
        let store = FlightStore::new();
        store.insert(flight("AI101", "Mumbai", "Delhi", 30)).await.unwrap();
        store.insert(flight("6E201", "Mumbai", "Bangalore", 30)).await.unwrap();

        let date = (Utc::now() + Duration::hours(30)).date_naive();

        // Substring, case-insensitive.
        let hits = store.search("mum", "DELHI", date, 1).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "AI101");

        // Wrong day.
        let hits = store
            .search("Mumbai", "Delhi", date + Duration::days(3), 1)
            .await;
        assert!(hits.is_empty());

        // Party larger than open seats.
        let hits = store.search("Mumbai", "Delhi", date, 181).await;
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_update_revalidates_times() {
        let store = FlightStore::new();
        store.insert(flight("AI101", "Mumbai", "Delhi", 48)).await.unwrap();

        let bad = FlightUpdate {
            arrival_time: Some(Utc::now()),
            ..Default::default()
        };
        assert!(store.update("AI101", bad).await.is_err());

        let ok = FlightUpdate {
            base_price: Some(5200),
            ..Default::default()
        };
        let updated = store.update("AI101", ok).await.unwrap();
        assert_eq!(updated.base_price, 5200);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let store = FlightStore::new();
        for i in 0..5 {
            store
                .insert(flight(&format!("AI10{}", i), "Mumbai", "Delhi", 24 + i))
                .await
                .unwrap();
        }
        let (page1, total) = store.list(1, 2).await;
        assert_eq!(total, 5);
        assert_eq!(page1.len(), 2);
        // Ordered by departure: earliest first.
        assert_eq!(page1[0].code, "AI100");

        let (page3, _) = store.list(3, 2).await;
        assert_eq!(page3.len(), 1);
    }
}
