use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::booking::BookingError;
use crate::catalog::InvalidTimezone;
use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg,
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(value: BookingError) -> Self {
        match value {
            BookingError::ClassNotFound(_) => ApiError::NotFound(value.to_string()),
            BookingError::NoCapacity(_) => ApiError::BadRequest(value.to_string()),
        }
    }
}

impl From<InvalidTimezone> for ApiError {
    fn from(value: InvalidTimezone) -> Self {
        ApiError::BadRequest(value.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        match value {
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::BadRequest("Request must be JSON".into())
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_errors_map_to_status() {
        let not_found: ApiError = BookingError::ClassNotFound("c9".into()).into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let full: ApiError = BookingError::NoCapacity("HIIT Express".into()).into();
        assert_eq!(full.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(full, ApiError::BadRequest(msg) if msg == "No slots available for 'HIIT Express'."));
    }

    #[test]
    fn test_into_response_carries_status() {
        let response = ApiError::NotFound("Class with ID 'c9' not found.".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::BadRequest("Request must be JSON".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_timezone_is_bad_request() {
        let err: ApiError = InvalidTimezone("Not/AZone".into()).into();
        assert!(
            matches!(err, ApiError::BadRequest(msg) if msg == "Invalid timezone string provided: Not/AZone")
        );
    }
}
