// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{DURATION_CHOICES, ServiceType};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "CARDX_API_URL";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Booking form defaults
    #[serde(default)]
    pub booking: BookingDefaults,

    /// Session hand-off channel settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Apply an explicit base URL override, typically from the environment.
    pub fn apply_api_url(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            self.api.base_url = Some(url);
        }
        self.api.base_url = self
            .api
            .base_url
            .take()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
    }

    /// Apply `CARDX_API_URL` if it is set.
    pub fn apply_env(&mut self) {
        self.apply_api_url(std::env::var(API_URL_ENV).ok());
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.api.user_agent.trim().is_empty() {
            return Err(AppError::validation("api.user_agent is empty"));
        }
        if self.api.timeout_secs == 0 {
            return Err(AppError::validation("api.timeout_secs must be > 0"));
        }
        if let Some(base) = &self.api.base_url {
            let parsed = Url::parse(base)?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(AppError::validation(format!(
                    "api.base_url must be http(s), got '{}'",
                    parsed.scheme()
                )));
            }
        }
        if !DURATION_CHOICES.contains(&self.booking.duration) {
            return Err(AppError::validation(format!(
                "booking.duration must be one of {:?}",
                DURATION_CHOICES
            )));
        }
        if self.booking.location.trim().is_empty() {
            return Err(AppError::validation("booking.location is empty"));
        }
        if self.session.ttl_secs == 0 {
            return Err(AppError::validation("session.ttl_secs must be > 0"));
        }
        Ok(())
    }

    /// Directory of the session hand-off channel, relative to `base`.
    pub fn session_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.session.dir)
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the booking backend; absent means "not configured"
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Defaults applied to a fresh appointment form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDefaults {
    /// In-person meeting location
    #[serde(default = "defaults::location")]
    pub location: String,

    /// Customer country sent with every appointment
    #[serde(default = "defaults::country")]
    pub country: String,

    #[serde(default)]
    pub service_type: ServiceType,

    /// Appointment length in minutes
    #[serde(default = "defaults::duration")]
    pub duration: u32,
}

impl Default for BookingDefaults {
    fn default() -> Self {
        Self {
            location: defaults::location(),
            country: defaults::country(),
            service_type: ServiceType::default(),
            duration: defaults::duration(),
        }
    }
}

/// Session hand-off channel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding pending hand-off entries
    #[serde(default = "defaults::session_dir")]
    pub dir: String,

    /// Entries older than this are discarded on read
    #[serde(default = "defaults::session_ttl")]
    pub ttl_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: defaults::session_dir(),
            ttl_secs: defaults::session_ttl(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // API defaults
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; cardx/0.1)".into()
    }

    // Booking defaults
    pub fn location() -> String {
        "1st Floor, Door F1B-013D, Town Center Building (TCB), Kigali City".into()
    }
    pub fn country() -> String {
        "Rwanda".into()
    }
    pub fn duration() -> u32 {
        30
    }

    // Session defaults
    pub fn session_dir() -> String {
        "session".into()
    }
    pub fn session_ttl() -> u64 {
        30 * 60
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn default_has_no_backend() {
        assert!(Config::default().api.base_url.is_none());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = Some("not a url".into());
        assert!(config.validate().is_err());

        config.api.base_url = Some("ftp://example.com".into());
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_odd_duration() {
        let mut config = Config::default();
        config.booking.duration = 25;
        assert!(config.validate().is_err());
    }

    #[test]
    fn api_url_override_strips_trailing_slash() {
        let mut config = Config::default();
        config.apply_api_url(Some("https://api.example.com/".into()));
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn blank_override_keeps_file_value() {
        let mut config = Config::default();
        config.api.base_url = Some("https://file.example.com".into());
        config.apply_api_url(Some("  ".into()));
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://file.example.com")
        );
    }

    #[test]
    fn parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://cardx-backend.example.com"

            [booking]
            duration = 45
            "#,
        )
        .unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.booking.duration, 45);
        assert_eq!(config.booking.country, "Rwanda");
        assert_eq!(config.session.dir, "session");
    }
}
