// src/backend/http.rs

//! HTTP implementation of the booking backend.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::backend::{BookingBackend, HealthStatus, flatten_error_body};
use crate::error::{AppError, Result};
use crate::models::{
    ApiConfig, Appointment, AppointmentRequest, AvailableSlots, PilgrimageBooking,
    PilgrimageRequest, SlotQuery,
};
use crate::utils::{date, http};

/// Booking backend reached over HTTP.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Option<String>,
}

impl HttpBackend {
    /// Create a backend client from API settings.
    ///
    /// A missing base URL is not an error here: every call then fails with
    /// [`AppError::NotConfigured`] without touching the network.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        let base_url = match config.base_url.as_deref() {
            Some(raw) => {
                let parsed = Url::parse(raw)?;
                Some(parsed.as_str().trim_end_matches('/').to_string())
            }
            None => {
                log::warn!("No backend base URL configured; API calls will fail");
                None
            }
        };
        Ok(Self { client, base_url })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Resolve an API path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_deref().ok_or(AppError::NotConfigured)?;
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// Send a request and decode a JSON success body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<T> {
        log::debug!("API request: {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| AppError::from_transport(url.as_str(), e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::from_transport(url.as_str(), e))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| flatten_error_body(&body));
            log::warn!(
                "API error {} from {}: {}",
                status.as_u16(),
                url,
                message.as_deref().unwrap_or("<no message>")
            );
            return Err(AppError::server(status.as_u16(), message));
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        self.execute(self.client.get(url.clone()), &url).await
    }
}

#[async_trait]
impl BookingBackend for HttpBackend {
    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlots> {
        let mut url = self.endpoint("/api/appointments/available-slots")?;
        url.query_pairs_mut()
            .append_pair("date_str", &date::iso(query.date))
            .append_pair("service_type", query.service_type.as_str())
            .append_pair("appointment_type", query.appointment_type.as_str());
        self.execute(self.client.get(url.clone()), &url).await
    }

    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<Appointment> {
        let url = self.endpoint("/api/appointments")?;
        self.execute(self.client.post(url.clone()).json(request), &url)
            .await
    }

    async fn get_appointment(&self, id: &str) -> Result<Appointment> {
        self.get(&format!("/api/appointments/{}", encode_segment(id)))
            .await
    }

    async fn cancel_appointment(&self, id: &str) -> Result<Appointment> {
        let url = self.endpoint(&format!("/api/appointments/{}/cancel", encode_segment(id)))?;
        self.execute(self.client.patch(url.clone()), &url).await
    }

    async fn create_pilgrimage_booking(
        &self,
        request: &PilgrimageRequest,
    ) -> Result<PilgrimageBooking> {
        let url = self.endpoint("/api/pilgrimage-bookings")?;
        self.execute(self.client.post(url.clone()).json(request), &url)
            .await
    }

    async fn get_pilgrimage_booking(&self, id: &str) -> Result<PilgrimageBooking> {
        self.get(&format!("/api/pilgrimage-bookings/{}", encode_segment(id)))
            .await
    }

    async fn health(&self) -> Result<HealthStatus> {
        self.get("/api/health").await
    }
}

/// Percent-encode an id for use as a single path segment.
fn encode_segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentType, ServiceType};
    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response; the handle yields the raw request head.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });
        (base, handle)
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let length = text[..head_end]
                    .lines()
                    .find_map(|l| {
                        let lower = l.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap_or(0))
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn backend(base_url: Option<String>, timeout_secs: u64) -> HttpBackend {
        HttpBackend::new(&ApiConfig {
            base_url,
            timeout_secs,
            ..ApiConfig::default()
        })
        .unwrap()
    }

    fn query() -> SlotQuery {
        SlotQuery {
            date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
            service_type: ServiceType::VisaConsultation,
            appointment_type: AppointmentType::Virtual,
        }
    }

    #[tokio::test]
    async fn test_not_configured() {
        let backend = backend(None, 5);
        assert!(!backend.is_configured());
        let err = backend.available_slots(&query()).await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured));
    }

    #[tokio::test]
    async fn test_available_slots_request() {
        let (base, handle) =
            serve_once("200 OK", r#"{"date":"2026-11-02","available_slots":["09:00","16:30"]}"#)
                .await;
        let backend = backend(Some(base), 5);

        let slots = backend.available_slots(&query()).await.unwrap();
        assert_eq!(slots.available_slots, vec!["09:00", "16:30"]);

        let request = handle.await.unwrap();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("GET /api/appointments/available-slots?"));
        assert!(request_line.contains(
            "date_str=2026-11-02&service_type=visa_consultation&appointment_type=virtual"
        ));
    }

    #[tokio::test]
    async fn test_conflict_detail_is_surfaced() {
        let (base, _handle) = serve_once(
            "400 Bad Request",
            r#"{"detail":"This time slot is already booked. Please choose another time."}"#,
        )
        .await;
        let backend = backend(Some(base), 5);

        let err = backend.cancel_appointment("abc").await.unwrap_err();
        match &err {
            AppError::Server { status, message } => {
                assert_eq!(*status, 400);
                assert!(message.as_deref().unwrap().contains("already booked"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_slot_conflict());
    }

    #[tokio::test]
    async fn test_validation_detail_flattened() {
        let (base, handle) =
            serve_once("422 Unprocessable Entity", r#"{"detail":[{"msg":"field required"}]}"#)
                .await;
        let backend = backend(Some(base), 5);

        let request = crate::models::PilgrimageApplication::default().to_request();
        let err = backend.create_pilgrimage_booking(&request).await.unwrap_err();
        assert_eq!(err.user_message("fallback"), "field required");

        let raw = handle.await.unwrap();
        assert!(raw.starts_with("POST /api/pilgrimage-bookings "));
        assert!(raw.contains("\"fullName\""));
    }

    #[tokio::test]
    async fn test_server_error_without_json() {
        let (base, _handle) = serve_once("502 Bad Gateway", "upstream down").await;
        let backend = backend(Some(base), 5);

        let err = backend.health().await.unwrap_err();
        assert!(matches!(err, AppError::Server { status: 502, message: None }));
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
    }

    #[tokio::test]
    async fn test_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = backend(Some(base), 5).health().await.unwrap_err();
        assert!(matches!(err, AppError::Unreachable { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn test_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let _hold = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_secs(10)).await;
            drop(stream);
        });

        let err = backend(Some(base), 1).health().await.unwrap_err();
        assert!(matches!(err, AppError::Timeout { .. }), "{err:?}");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let backend = backend(Some("https://example.com/backend/".into()), 5);
        assert_eq!(
            backend.endpoint("/api/health").unwrap().as_str(),
            "https://example.com/backend/api/health"
        );
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("abc-123"), "abc-123");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
    }
}
