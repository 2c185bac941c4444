use chrono::{Duration, Utc};
use skyfare_core::seat::default_layout;
use skyfare_core::Flight;

use crate::flight_store::FlightStore;
use crate::StoreError;

struct Route {
    source: &'static str,
    destination: &'static str,
    base_price: i64,
    duration_minutes: i64,
}

const ROUTES: [Route; 6] = [
    Route { source: "Mumbai", destination: "Delhi", base_price: 4500, duration_minutes: 150 },
    Route { source: "Delhi", destination: "Mumbai", base_price: 4500, duration_minutes: 150 },
    Route { source: "Mumbai", destination: "Bangalore", base_price: 3500, duration_minutes: 90 },
    Route { source: "Delhi", destination: "Kolkata", base_price: 4000, duration_minutes: 135 },
    Route { source: "Bangalore", destination: "Hyderabad", base_price: 2500, duration_minutes: 70 },
    Route { source: "Chennai", destination: "Goa", base_price: 3000, duration_minutes: 95 },
];

const AIRLINES: [(&str, &str); 3] = [
    ("Air India", "AI"),
    ("IndiGo", "6E"),
    ("SpiceJet", "SG"),
];

/// Populate the flight store with a demo schedule: each route flown by
/// each carrier daily for the next three days.
pub async fn seed_flights(store: &FlightStore, seat_rows: u32) -> Result<usize, StoreError> {
    let mut count = 0;
    let base = Utc::now() + Duration::hours(6);

    for (route_idx, route) in ROUTES.iter().enumerate() {
        for (airline_idx, (airline, prefix)) in AIRLINES.iter().enumerate() {
            for day in 0..3 {
                let code = format!("{}{}{}{}", prefix, route_idx + 1, airline_idx, day);
                let departure = base + Duration::days(day) + Duration::hours(airline_idx as i64 * 3);
                let flight = Flight::new(
                    code,
                    airline.to_string(),
                    route.source.to_string(),
                    route.destination.to_string(),
                    departure,
                    departure + Duration::minutes(route.duration_minutes),
                    route.base_price,
                    default_layout(seat_rows),
                )
                .map_err(StoreError::Core)?;
                store.insert(flight).await?;
                count += 1;
            }
        }
    }

    tracing::info!(count, "seeded demo flights");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_populates_unique_future_flights() {
        let store = FlightStore::new();
        let count = seed_flights(&store, 30).await.unwrap();
        assert_eq!(count, ROUTES.len() * AIRLINES.len() * 3);

        let (flights, total) = store.list(1, 1000).await;
        assert_eq!(total, count);
        let now = Utc::now();
        assert!(flights.iter().all(|f| f.departure_time > now));
        assert!(flights.iter().all(|f| f.seats.len() == 180));
    }
}
