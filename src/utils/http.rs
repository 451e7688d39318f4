// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;

/// Create the asynchronous HTTP client used for every backend call.
///
/// The timeout is mandatory: a cold backend must fail fast instead of
/// leaving the form stuck in a loading state.
pub fn create_async_client(config: &ApiConfig) -> Result<reqwest::Client> {
    if config.timeout_secs == 0 {
        return Err(AppError::config("api.timeout_secs must be positive"));
    }
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
