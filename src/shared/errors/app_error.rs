use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// The remote endpoint could not be reached at all.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// True when the failure means no further request can succeed either,
    /// as opposed to a rejection of one particular payload.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, AppError::ServiceUnavailable(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            AppError::ServiceUnavailable("Failed to connect to external service".to_string())
        } else if err.is_timeout() {
            AppError::ExternalServiceError("Request timeout".to_string())
        } else if let Some(status) = err.status() {
            match status.as_u16() {
                429 => AppError::RateLimitError("Too many requests".to_string()),
                404 => AppError::NotFound("External resource not found".to_string()),
                401 | 403 => {
                    AppError::Unauthorized("Not authorized to access external service".to_string())
                }
                502..=504 => AppError::ServiceUnavailable(format!("HTTP {}", status)),
                _ => AppError::ApiError(format!("HTTP {}: {}", status, err)),
            }
        } else {
            AppError::ApiError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => AppError::DecodeError(format!("line {}: {}", pos.line(), err)),
            None => AppError::DecodeError(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::DecodeError(format!("I/O failure: {}", err))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
