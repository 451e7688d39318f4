// src/error.rs

//! Unified error handling for the booking client.

use std::collections::BTreeMap;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Field name to message, in field order.
pub type FieldErrors = BTreeMap<String, String>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed for a reason not covered below
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Pattern compilation failed
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Form-level validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Field-level validation errors
    #[error("{} field(s) failed validation", .0.len())]
    Fields(FieldErrors),

    /// Backend did not answer within the client timeout
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// Backend could not be reached at all
    #[error("Cannot reach {url}: {message}")]
    Unreachable { url: String, message: String },

    /// No backend base URL is configured
    #[error("Backend API URL not configured")]
    NotConfigured,

    /// Backend answered with a non-success status
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        status: u16,
        message: Option<String>,
    },
}

const TIMEOUT_MESSAGE: &str = "Request timed out. The backend server may be starting up \
(this can take 30-60 seconds). Please wait a moment and try again.";

const UNREACHABLE_MESSAGE: &str = "Cannot connect to backend server. Please check if the \
backend is deployed and the API URL is configured correctly.";

const NOT_CONFIGURED_MESSAGE: &str = "Backend API URL not configured. Please set the \
CARDX_API_URL environment variable or api.base_url in config.toml.";

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a server error from a status and an optional flattened message.
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    /// Classify a transport-level reqwest failure.
    pub fn from_transport(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Unreachable {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Http(error)
        }
    }

    /// The single message shown to the user for this error.
    ///
    /// `fallback` is used when the error carries nothing presentable,
    /// e.g. a server error without a body.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
            Self::Unreachable { .. } => UNREACHABLE_MESSAGE.to_string(),
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE.to_string(),
            Self::Server {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether the backend rejected a submission because the slot is taken.
    pub fn is_slot_conflict(&self) -> bool {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } => message.contains("already booked") || message.contains("time slot"),
            _ => false,
        }
    }

    /// Whether retrying the same request later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unreachable { .. })
    }
}
