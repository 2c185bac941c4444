use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skyfare_core::{pnr, seat, Booking, BookingStatus, PaymentStatus, Flight};
use skyfare_pricing::{cabin, QuoteInputs};
use uuid::Uuid;

use crate::error::AppError;
use crate::flights::PageParams;
use crate::middleware::auth::Claims;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub flight_code: String,
    pub passenger_name: String,
    pub seat_number: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub passenger_name: Option<String>,
    pub seat_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FlightSummary {
    pub airline: String,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub pnr: String,
    pub flight_code: String,
    pub passenger_name: String,
    pub seat_number: String,
    /// Derived from the seat row on every read, never stored.
    pub seat_class: String,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub price: i64,
    pub booked_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight: Option<FlightSummary>,
}

fn booking_response(booking: &Booking, flight: Option<&Flight>) -> BookingResponse {
    let class = cabin::classify(seat::seat_row(&booking.seat_label));
    BookingResponse {
        pnr: booking.pnr.clone(),
        flight_code: booking.flight_code.clone(),
        passenger_name: booking.passenger_name.clone(),
        seat_number: booking.seat_label.clone(),
        seat_class: class.label().to_string(),
        status: booking.status.clone(),
        payment_status: booking.payment_status.clone(),
        price: booking.price_amount,
        booked_at: booking.booked_at,
        flight: flight.map(|f| FlightSummary {
            airline: f.airline.clone(),
            source: f.source.clone(),
            destination: f.destination.clone(),
            departure_time: f.departure_time,
            arrival_time: f.arrival_time,
        }),
    }
}

fn owner_id(claims: &Claims) -> Result<Uuid, AppError> {
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::AuthenticationError("Invalid subject claim".to_string()))
}

// ============================================================================
// Routes
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bookings", post(create_booking).get(list_my_bookings))
        .route("/bookings/{pnr}", get(get_booking).patch(update_booking))
        .route("/bookings/{pnr}/cancel", post(cancel_booking))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/bookings", get(list_all_bookings))
        .route("/admin/bookings/{pnr}", get(admin_get_booking))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let user_id = owner_id(&claims)?;
    let passenger = req.passenger_name.trim();
    if passenger.is_empty() {
        return Err(AppError::ValidationError("Passenger name is required".to_string()));
    }
    seat::parse_label(&req.seat_number).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let flight = state.flights.get(&req.flight_code).await?;
    if flight.has_departed(Utc::now()) {
        return Err(AppError::ValidationError(
            "Cannot book a flight in the past".to_string(),
        ));
    }

    // Quote against occupancy as it stands before this booking, the way
    // the price was shown to the passenger.
    let price = state
        .pricing
        .quote_now(&QuoteInputs::for_seat(&flight, &req.seat_number));

    // Availability check and seat write happen atomically in the store.
    let flight = state
        .flights
        .book_seat(&req.flight_code, &req.seat_number, passenger)
        .await?;

    // Re-draw on the (unlikely) record-locator collision.
    let booking = loop {
        let locator = pnr::generate(&mut rand::thread_rng());
        let booking = Booking::new(
            locator,
            user_id,
            req.flight_code.clone(),
            passenger.to_string(),
            req.seat_number.clone(),
            price,
        );
        match state.bookings.insert(booking.clone()).await {
            Ok(()) => break booking,
            Err(skyfare_store::StoreError::DuplicatePnr(_)) => continue,
            Err(e) => {
                // Undo the seat write so the cabin is not left blocked.
                let _ = state
                    .flights
                    .release_seat(&req.flight_code, &req.seat_number)
                    .await;
                return Err(e.into());
            }
        }
    };

    tracing::info!(pnr = %booking.pnr, flight = %booking.flight_code, seat = %booking.seat_label, "booking confirmed");

    Ok(Json(booking_response(&booking, Some(&flight))))
}

/// GET /bookings
async fn list_my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = owner_id(&claims)?;
    let bookings = state.bookings.list_for_user(user_id).await;

    let mut out = Vec::with_capacity(bookings.len());
    for booking in &bookings {
        let flight = state.flights.get(&booking.flight_code).await.ok();
        out.push(booking_response(booking, flight.as_ref()));
    }

    Ok(Json(serde_json::json!({
        "bookings": out,
        "count": out.len(),
    })))
}

/// GET /bookings/{pnr}
async fn get_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(locator): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let user_id = owner_id(&claims)?;
    let booking = state.bookings.get(&locator).await?;
    if booking.user_id != user_id {
        return Err(AppError::AuthorizationError(
            "Unauthorized access to booking".to_string(),
        ));
    }
    let flight = state.flights.get(&booking.flight_code).await.ok();
    Ok(Json(booking_response(&booking, flight.as_ref())))
}

/// PATCH /bookings/{pnr}
async fn update_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(locator): Path<String>,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let user_id = owner_id(&claims)?;
    let mut booking = state.bookings.get(&locator).await?;
    if booking.user_id != user_id {
        return Err(AppError::AuthorizationError(
            "Unauthorized to update this booking".to_string(),
        ));
    }
    if booking.is_cancelled() {
        return Err(AppError::ValidationError(
            "Cannot update a cancelled booking".to_string(),
        ));
    }

    if let Some(new_seat) = req.seat_number {
        if new_seat != booking.seat_label {
            seat::parse_label(&new_seat).map_err(|e| AppError::ValidationError(e.to_string()))?;
            // Take the new seat first; only then release the old one.
            state
                .flights
                .book_seat(&booking.flight_code, &new_seat, &booking.passenger_name)
                .await?;
            state
                .flights
                .release_seat(&booking.flight_code, &booking.seat_label)
                .await?;
            booking.seat_label = new_seat;
        }
    }

    if let Some(name) = req.passenger_name {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::ValidationError("Passenger name is required".to_string()));
        }
        state
            .flights
            .rename_passenger(&booking.flight_code, &booking.seat_label, &name)
            .await?;
        booking.passenger_name = name;
    }

    booking.updated_at = Utc::now();
    state.bookings.put(booking.clone()).await?;

    let flight = state.flights.get(&booking.flight_code).await.ok();
    Ok(Json(booking_response(&booking, flight.as_ref())))
}

/// POST /bookings/{pnr}/cancel
async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(locator): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let user_id = owner_id(&claims)?;
    let mut booking = state.bookings.get(&locator).await?;
    if booking.user_id != user_id {
        return Err(AppError::AuthorizationError(
            "Unauthorized to cancel this booking".to_string(),
        ));
    }
    if booking.is_cancelled() {
        return Err(AppError::ValidationError(
            "Booking is already cancelled".to_string(),
        ));
    }

    let flight = state.flights.get(&booking.flight_code).await?;
    if flight.has_departed(Utc::now()) {
        return Err(AppError::ValidationError(
            "Cannot cancel a booking for a past flight".to_string(),
        ));
    }

    state
        .flights
        .release_seat(&booking.flight_code, &booking.seat_label)
        .await?;

    booking.status = BookingStatus::Cancelled;
    booking.payment_status = PaymentStatus::Refunded;
    booking.updated_at = Utc::now();
    state.bookings.put(booking.clone()).await?;

    tracing::info!(pnr = %booking.pnr, "booking cancelled");

    Ok(Json(booking_response(&booking, Some(&flight))))
}

/// GET /admin/bookings/{pnr} (admin)
async fn admin_get_booking(
    State(state): State<AppState>,
    Path(locator): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = state.bookings.get(&locator).await?;
    let flight = state.flights.get(&booking.flight_code).await.ok();
    Ok(Json(booking_response(&booking, flight.as_ref())))
}

/// GET /admin/bookings?page=..&per_page=.. (admin)
async fn list_all_bookings(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(state.business_rules.default_page_size)
        .max(1);
    let (bookings, total) = state.bookings.list_all(page, per_page).await;

    let mut out = Vec::with_capacity(bookings.len());
    for booking in &bookings {
        let flight = state.flights.get(&booking.flight_code).await.ok();
        out.push(booking_response(booking, flight.as_ref()));
    }

    Ok(Json(serde_json::json!({
        "bookings": out,
        "total": total,
        "pages": total.div_ceil(per_page),
        "current_page": page,
    })))
}
