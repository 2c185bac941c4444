use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skyfare_core::seat::{self, SeatMap, SeatStatus};
use skyfare_core::Flight;
use skyfare_pricing::{cabin, QuoteInputs};
use skyfare_store::FlightUpdate;

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateFlightRequest {
    pub code: String,
    pub airline: String,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub base_price: i64,
    /// Optional explicit cabin; absent means the default layout.
    pub seats: Option<SeatMap>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub source: String,
    pub destination: String,
    pub date: NaiveDate,
    pub passengers: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub seat: String,
}

#[derive(Debug, Serialize)]
pub struct FlightResponse {
    pub code: String,
    pub airline: String,
    pub source: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub base_price: i64,
    /// Current dynamic price at the Economy baseline.
    pub price: i64,
    pub available_seats: usize,
}

#[derive(Debug, Serialize)]
pub struct FlightListResponse {
    pub flights: Vec<FlightResponse>,
    pub total: usize,
    pub pages: usize,
    pub current_page: usize,
}

#[derive(Debug, Serialize)]
pub struct SeatResponse {
    pub label: String,
    pub status: SeatStatus,
    pub fare_class: String,
    pub color_tag: &'static str,
    /// Class-adjusted base fare shown on the seat map; the binding
    /// price comes from the quote endpoint.
    pub display_price: i64,
}

#[derive(Debug, Serialize)]
pub struct SeatMapResponse {
    pub flight_code: String,
    pub seats: Vec<SeatResponse>,
    pub available: usize,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub flight_code: String,
    pub seat: String,
    pub fare_class: String,
    /// Ephemeral: the same seat can quote differently on the next call.
    pub price: i64,
}

fn flight_response(state: &AppState, flight: &Flight) -> FlightResponse {
    let price = state.pricing.quote_now(&QuoteInputs::for_flight(flight));
    FlightResponse {
        code: flight.code.clone(),
        airline: flight.airline.clone(),
        source: flight.source.clone(),
        destination: flight.destination.clone(),
        departure_time: flight.departure_time,
        arrival_time: flight.arrival_time,
        base_price: flight.base_price,
        price,
        available_seats: flight.available_seat_count(),
    }
}

// ============================================================================
// Routes
// ============================================================================

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/flights/search", get(search_flights))
        .route("/flights/{code}", get(get_flight))
        .route("/flights/{code}/seats", get(get_seat_map))
        .route("/flights/{code}/quote", get(quote_seat))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/flights", post(create_flight).get(list_flights))
        .route(
            "/admin/flights/{code}",
            axum::routing::put(update_flight).delete(delete_flight),
        )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /flights/search?source=..&destination=..&date=..&passengers=..
async fn search_flights(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let passengers = params.passengers.unwrap_or(1);
    let hits = state
        .flights
        .search(&params.source, &params.destination, params.date, passengers)
        .await;

    let flights: Vec<FlightResponse> =
        hits.iter().map(|f| flight_response(&state, f)).collect();

    Ok(Json(serde_json::json!({
        "flights": flights,
        "count": flights.len(),
    })))
}

/// GET /flights/{code}
async fn get_flight(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<FlightResponse>, AppError> {
    let flight = state.flights.get(&code).await?;
    Ok(Json(flight_response(&state, &flight)))
}

/// GET /flights/{code}/seats
async fn get_seat_map(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let flight = state.flights.get(&code).await?;
    let seats: Vec<SeatResponse> = flight
        .seats
        .iter()
        .map(|(label, s)| {
            let class = cabin::classify(seat::seat_row(label));
            SeatResponse {
                label: label.clone(),
                status: s.status,
                fare_class: class.label().to_string(),
                color_tag: class.color_tag(),
                display_price: (flight.base_price as f64 * class.multiplier()).round() as i64,
            }
        })
        .collect();

    Ok(Json(SeatMapResponse {
        flight_code: flight.code.clone(),
        available: flight.available_seat_count(),
        seats,
    }))
}

/// GET /flights/{code}/quote?seat=12C
async fn quote_seat(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<QuoteResponse>, AppError> {
    let flight = state.flights.get(&code).await?;
    let inputs = QuoteInputs::for_seat(&flight, &params.seat);
    let class = cabin::classify(inputs.seat_row);
    let price = state.pricing.quote_now(&inputs);

    Ok(Json(QuoteResponse {
        flight_code: flight.code,
        seat: params.seat,
        fare_class: class.label().to_string(),
        price,
    }))
}

/// POST /flights (admin)
async fn create_flight(
    State(state): State<AppState>,
    Json(req): Json<CreateFlightRequest>,
) -> Result<Json<FlightResponse>, AppError> {
    let seats = req
        .seats
        .unwrap_or_else(|| seat::default_layout(state.business_rules.default_seat_rows));

    let flight = Flight::new(
        req.code,
        req.airline,
        req.source,
        req.destination,
        req.departure_time,
        req.arrival_time,
        req.base_price,
        seats,
    )
    .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = flight_response(&state, &flight);
    state.flights.insert(flight).await?;
    Ok(Json(response))
}

/// GET /flights?page=..&per_page=.. (admin)
async fn list_flights(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<FlightListResponse>, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(state.business_rules.default_page_size)
        .max(1);
    let (flights, total) = state.flights.list(page, per_page).await;

    Ok(Json(FlightListResponse {
        flights: flights.iter().map(|f| flight_response(&state, f)).collect(),
        total,
        pages: total.div_ceil(per_page),
        current_page: page,
    }))
}

/// PUT /flights/{code} (admin)
async fn update_flight(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(update): Json<FlightUpdate>,
) -> Result<Json<FlightResponse>, AppError> {
    let flight = state.flights.update(&code, update).await?;
    Ok(Json(flight_response(&state, &flight)))
}

/// DELETE /flights/{code} (admin)
async fn delete_flight(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let active = state.bookings.count_confirmed_for_flight(&code).await;
    if active > 0 {
        return Err(AppError::ConflictError(format!(
            "Cannot delete flight with {} active bookings",
            active
        )));
    }
    state.flights.delete(&code).await?;
    tracing::info!(%code, "flight deleted");
    Ok(Json(serde_json::json!({ "message": "Flight deleted successfully" })))
}
