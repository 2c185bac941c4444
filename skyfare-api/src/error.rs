use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skyfare_store::StoreError;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::FlightNotFound(_) | StoreError::BookingNotFound(_) => {
                AppError::NotFoundError(err.to_string())
            }
            StoreError::DuplicateFlightCode(_)
            | StoreError::DuplicatePnr(_)
            | StoreError::DuplicateEmail(_)
            | StoreError::SeatUnavailable { .. } => AppError::ConflictError(err.to_string()),
            StoreError::UnknownSeat { .. } | StoreError::Core(_) => {
                AppError::ValidationError(err.to_string())
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_store_errors_map_to_http_statuses() {
        let not_found: AppError = StoreError::FlightNotFound("AI101".to_string()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let conflict: AppError = StoreError::SeatUnavailable {
            flight: "AI101".to_string(),
            seat: "12C".to_string(),
        }
        .into();
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);

        let bad_request: AppError = StoreError::UnknownSeat {
            flight: "AI101".to_string(),
            seat: "99Z".to_string(),
        }
        .into();
        assert_eq!(bad_request.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
