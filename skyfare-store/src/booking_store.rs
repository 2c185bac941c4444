use skyfare_core::{Booking, BookingStatus};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::StoreError;

/// In-memory booking records keyed by PNR.
pub struct BookingStore {
    bookings: RwLock<HashMap<String, Booking>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: RwLock::new(HashMap::new()),
        }
    }

    /// Insert a booking; the PNR must be unused. Callers re-draw a fresh
    /// PNR and retry on collision.
    pub async fn insert(&self, booking: Booking) -> Result<(), StoreError> {
        let mut bookings = self.bookings.write().await;
        if bookings.contains_key(&booking.pnr) {
            return Err(StoreError::DuplicatePnr(booking.pnr));
        }
        tracing::info!(pnr = %booking.pnr, flight = %booking.flight_code, "booking stored");
        bookings.insert(booking.pnr.clone(), booking);
        Ok(())
    }

    pub async fn contains_pnr(&self, pnr: &str) -> bool {
        self.bookings.read().await.contains_key(pnr)
    }

    pub async fn get(&self, pnr: &str) -> Result<Booking, StoreError> {
        self.bookings
            .read()
            .await
            .get(pnr)
            .cloned()
            .ok_or_else(|| StoreError::BookingNotFound(pnr.to_string()))
    }

    /// Replace a booking record, keyed by its PNR.
    pub async fn put(&self, booking: Booking) -> Result<(), StoreError> {
        let mut bookings = self.bookings.write().await;
        if !bookings.contains_key(&booking.pnr) {
            return Err(StoreError::BookingNotFound(booking.pnr));
        }
        bookings.insert(booking.pnr.clone(), booking);
        Ok(())
    }

    /// A user's bookings, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Vec<Booking> {
        let bookings = self.bookings.read().await;
        let mut mine: Vec<Booking> = bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        mine.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        mine
    }

    /// All bookings, newest first, with the total count for pagination.
    pub async fn list_all(&self, page: usize, per_page: usize) -> (Vec<Booking>, usize) {
        let bookings = self.bookings.read().await;
        let mut all: Vec<Booking> = bookings.values().cloned().collect();
        all.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));
        let total = all.len();
        let start = page.saturating_sub(1).saturating_mul(per_page);
        let items = all.into_iter().skip(start).take(per_page).collect();
        (items, total)
    }

    /// Confirmed bookings still referencing a flight. Flight deletion is
    /// refused while this is non-zero.
    pub async fn count_confirmed_for_flight(&self, flight_code: &str) -> usize {
        self.bookings
            .read()
            .await
            .values()
            .filter(|b| b.flight_code == flight_code && b.status == BookingStatus::Confirmed)
            .count()
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(pnr: &str, user_id: Uuid, flight_code: &str) -> Booking {
        Booking::new(
            pnr.to_string(),
            user_id,
            flight_code.to_string(),
            "Asha Rao".to_string(),
            "12C".to_string(),
            5400,
        )
    }

    #[tokio::test]
    async fn test_pnr_collision_is_rejected() {
        let store = BookingStore::new();
        let user = Uuid::new_v4();
        store.insert(booking("FL1234AB", user, "AI101")).await.unwrap();
        let err = store.insert(booking("FL1234AB", user, "6E201")).await;
        assert!(matches!(err, Err(StoreError::DuplicatePnr(_))));
        assert!(store.contains_pnr("FL1234AB").await);
    }

    #[tokio::test]
    async fn test_list_for_user_is_scoped_and_newest_first() {
        let store = BookingStore::new();
        let me = Uuid::new_v4();
        let someone_else = Uuid::new_v4();

        store.insert(booking("FL1111AA", me, "AI101")).await.unwrap();
        store.insert(booking("FL2222BB", someone_else, "AI101")).await.unwrap();
        let mut later = booking("FL3333CC", me, "6E201");
        later.booked_at = later.booked_at + chrono::Duration::minutes(5);
        store.insert(later).await.unwrap();

        let mine = store.list_for_user(me).await;
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].pnr, "FL3333CC");
        assert_eq!(mine[1].pnr, "FL1111AA");
    }

    #[tokio::test]
    async fn test_confirmed_count_ignores_cancelled() {
        let store = BookingStore::new();
        let user = Uuid::new_v4();
        store.insert(booking("FL1111AA", user, "AI101")).await.unwrap();

        let mut cancelled = booking("FL2222BB", user, "AI101");
        cancelled.status = BookingStatus::Cancelled;
        store.insert(cancelled).await.unwrap();

        assert_eq!(store.count_confirmed_for_flight("AI101").await, 1);
        assert_eq!(store.count_confirmed_for_flight("6E201").await, 0);
    }
}
