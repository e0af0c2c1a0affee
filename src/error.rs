// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::{CredentialError, TokenError};
use crate::database::DatabaseError;
use crate::search::SearchError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Every variant renders as `{ "error": "<message>" }`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // Duplicate unique key; reported as 400 like any other bad input
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

/// One-step classification of unexpected failures at the handler boundary.
///
/// The underlying error is logged; the client only sees `message`.
pub trait ResultExt<T> {
    fn or_internal(self, message: &str) -> Result<T, ApiError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn or_internal(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|e| {
            tracing::error!("{}: {}", message, e);
            ApiError::internal_server_error(message)
        })
    }
}

impl ApiError {
    /// Storage failure while writing a record: constraint violations are the
    /// caller's fault, everything else is internal.
    pub fn from_write(err: DatabaseError, entity: &str, failure: &str) -> Self {
        match err {
            DatabaseError::UniqueViolation(detail) => {
                tracing::debug!("Unique violation writing {}: {}", entity, detail);
                ApiError::conflict(format!("{} already exists", entity))
            }
            DatabaseError::ForeignKeyViolation(detail) => {
                tracing::debug!("Foreign key violation writing {}: {}", entity, detail);
                ApiError::bad_request("Referenced device or user does not exist")
            }
            DatabaseError::MissingField(field) => {
                ApiError::bad_request(format!("{} is required", field))
            }
            other => {
                tracing::error!("{}: {}", failure, other);
                ApiError::internal_server_error(failure)
            }
        }
    }
}

impl ApiError {
    /// Password hashing failure: unusable plaintext is the caller's fault.
    pub fn from_credential(err: CredentialError, failure: &str) -> Self {
        match err {
            CredentialError::Hashing(detail) => {
                tracing::error!("{}: {}", failure, detail);
                ApiError::internal_server_error(failure)
            }
            other => ApiError::bad_request(other.to_string()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(msg) => {
                tracing::error!("Token generation failed: {}", msg);
                ApiError::internal_server_error("Failed to generate token")
            }
            TokenError::Malformed(detail) => {
                tracing::debug!("Rejected malformed token: {}", detail);
                ApiError::unauthorized(TokenError::Malformed(detail).to_string())
            }
            other => ApiError::unauthorized(other.to_string()),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::bad_request("Invalid JSON body")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        ApiError::bad_request("Invalid query string")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
