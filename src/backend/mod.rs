// src/backend/mod.rs

//! Booking backend abstraction.
//!
//! The backend owns slot computation and persistence; this crate only
//! consumes its contract:
//!
//! ```text
//! POST  /api/appointments
//! GET   /api/appointments/available-slots?date_str=&service_type=&appointment_type=
//! GET   /api/appointments/{id}
//! PATCH /api/appointments/{id}/cancel
//! POST  /api/pilgrimage-bookings
//! GET   /api/pilgrimage-bookings/{id}
//! GET   /api/health
//! ```

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::models::{
    Appointment, AppointmentRequest, AvailableSlots, PilgrimageBooking, PilgrimageRequest,
    SlotQuery,
};

// Re-export for convenience
pub use http::HttpBackend;

/// Backend health report.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HealthStatus {
    pub status: String,
    pub server: String,
    pub database: String,
    pub email_service: String,
    pub timestamp: Option<String>,
    pub message: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Trait for booking backends.
#[async_trait]
pub trait BookingBackend: Send + Sync {
    /// Bookable time labels for a date, service and appointment type.
    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlots>;

    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<Appointment>;

    async fn get_appointment(&self, id: &str) -> Result<Appointment>;

    async fn cancel_appointment(&self, id: &str) -> Result<Appointment>;

    async fn create_pilgrimage_booking(
        &self,
        request: &PilgrimageRequest,
    ) -> Result<PilgrimageBooking>;

    async fn get_pilgrimage_booking(&self, id: &str) -> Result<PilgrimageBooking>;

    async fn health(&self) -> Result<HealthStatus>;
}

/// Reduce an error body to one human-readable message.
///
/// Handles FastAPI-style `{"detail": "..."}` and
/// `{"detail": [{"msg": "..."}, ...]}` as well as `message` / `error` keys.
pub fn flatten_error_body(body: &Value) -> Option<String> {
    let detail = match body.get("detail") {
        Some(Value::String(detail)) => non_blank(detail),
        Some(Value::Array(items)) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => non_blank(s),
                    other => other.get("msg").and_then(Value::as_str).and_then(non_blank),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Some(Value::Object(obj)) => obj.get("msg").and_then(Value::as_str).and_then(non_blank),
        _ => None,
    };

    detail
        .or_else(|| body.get("message").and_then(Value::as_str).and_then(non_blank))
        .or_else(|| body.get("error").and_then(Value::as_str).and_then(non_blank))
}

fn non_blank(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

#[cfg(test)]
pub(crate) mod fake;
