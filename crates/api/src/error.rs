//! API error types with HTTP response mapping.

use aggregator::AggregationError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// Domain logic error.
    Domain(DomainError),
    /// User detail aggregation error.
    Aggregation(AggregationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => domain_error_to_response(err),
            ApiError::Aggregation(err) => aggregation_error_to_response(err),
        };

        metrics::counter!("http_errors_total", "status" => status.as_u16().to_string())
            .increment(1);

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_error_to_response(err: DomainError) -> (StatusCode, String) {
    match &err {
        DomainError::Validation(_) | DomainError::Mapping(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        DomainError::Storage(_) | DomainError::PasswordHash(_) => {
            tracing::error!(error = %err, "internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

fn aggregation_error_to_response(err: AggregationError) -> (StatusCode, String) {
    match err {
        AggregationError::User(err) => domain_error_to_response(err),
        AggregationError::PartialFailure(ref remote) => {
            tracing::error!(error = %remote, "order history unavailable");
            let status = if remote.is_timeout() {
                StatusCode::GATEWAY_TIMEOUT
            } else {
                StatusCode::BAD_GATEWAY
            };
            (status, err.to_string())
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<AggregationError> for ApiError {
    fn from(err: AggregationError) -> Self {
        ApiError::Aggregation(err)
    }
}

impl From<domain::MappingError> for ApiError {
    fn from(err: domain::MappingError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
