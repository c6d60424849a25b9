//! Error types shared across the playlist generation flow.
//!
//! Two families of errors reach the user: [`ValidationError`] for form input
//! that cannot be turned into a recommendation request, and [`ApiError`] for
//! anything the Spotify Web API rejected (or answered with nothing useful).
//! [`GenerateError`] wraps both so the orchestrator can use `?` on every step.

use reqwest::StatusCode;
use thiserror::Error;

/// A failed (or semantically empty) call to the Spotify Web API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (status {status_code})")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
    pub user_facing_hint: Option<String>,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            user_facing_hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.user_facing_hint = Some(hint.into());
        self
    }

    /// Builds an error for a request that never produced a response.
    ///
    /// Timeouts map to 504, every other transport failure to 502.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let status = if err.is_timeout() {
            StatusCode::GATEWAY_TIMEOUT
        } else {
            StatusCode::BAD_GATEWAY
        };

        Self::new(status.as_u16(), err.to_string())
            .with_hint("Spotify could not be reached. Please try again in a moment.")
    }

    /// Falls back to the canonical reason phrase when the body carried no
    /// error object.
    pub fn from_status(status: StatusCode) -> Self {
        let message = status.canonical_reason().unwrap_or("unexpected response");
        Self::new(status.as_u16(), message)
    }
}

/// Form input that cannot be turned into a recommendation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be a whole number, got '{value}'")]
    NotANumber { field: &'static str, value: String },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i32 },
}

/// Terminal failure of a playlist generation run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("spotify request failed: {0}")]
    Api(#[from] ApiError),
}

impl GenerateError {
    /// HTTP status to answer the form submission with.
    pub fn status_code(&self) -> u16 {
        match self {
            GenerateError::Validation(_) => StatusCode::BAD_REQUEST.as_u16(),
            GenerateError::Api(e) => e.status_code,
        }
    }

    pub fn message(&self) -> String {
        match self {
            GenerateError::Validation(e) => e.to_string(),
            GenerateError::Api(e) => e.message.clone(),
        }
    }

    pub fn hint(&self) -> Option<&str> {
        match self {
            GenerateError::Validation(_) => None,
            GenerateError::Api(e) => e.user_facing_hint.as_deref(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingVar(&'static str),

    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read .env file: {0}")]
    Dotenv(#[from] dotenv::Error),
}
