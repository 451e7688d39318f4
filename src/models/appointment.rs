// src/models/appointment.rs

//! Appointment booking data: form state, wire payloads and records.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::config::BookingDefaults;

/// Meeting lengths offered by the booking form, in minutes.
pub const DURATION_CHOICES: [u32; 4] = [30, 45, 60, 90];

/// Worker value meaning "any available consultant".
pub const ANY_WORKER: &str = "any";

/// In-person or virtual consultation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    #[default]
    InPerson,
    Virtual,
}

impl AppointmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentType::InPerson => "in_person",
            AppointmentType::Virtual => "virtual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppointmentType::InPerson => "In-Person",
            AppointmentType::Virtual => "Virtual",
        }
    }
}

impl fmt::Display for AppointmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_person" => Ok(Self::InPerson),
            "virtual" => Ok(Self::Virtual),
            other => Err(AppError::validation(format!(
                "unknown appointment type '{other}'"
            ))),
        }
    }
}

/// Consultation topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    #[default]
    VisaConsultation,
    AdmissionGuidance,
    WorkPermit,
    ExpressEntry,
    GeneralInquiry,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::VisaConsultation,
        ServiceType::AdmissionGuidance,
        ServiceType::WorkPermit,
        ServiceType::ExpressEntry,
        ServiceType::GeneralInquiry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::VisaConsultation => "visa_consultation",
            ServiceType::AdmissionGuidance => "admission_guidance",
            ServiceType::WorkPermit => "work_permit",
            ServiceType::ExpressEntry => "express_entry",
            ServiceType::GeneralInquiry => "general_inquiry",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::VisaConsultation => "Visa Consultation",
            ServiceType::AdmissionGuidance => "Admission Guidance",
            ServiceType::WorkPermit => "Work Permit Application",
            ServiceType::ExpressEntry => "Express Entry for Canada",
            ServiceType::GeneralInquiry => "General Inquiry",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::validation(format!("unknown service type '{s}'")))
    }
}

/// Editable fields of the appointment form.
///
/// Date and time selection live on the controller, next to the slot set
/// they must agree with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub appointment_type: AppointmentType,
    pub location: String,
    pub worker: String,
    pub service_type: ServiceType,
    pub duration: u32,
    pub description: String,
}

impl AppointmentForm {
    /// Fresh form seeded from configuration defaults.
    pub fn from_defaults(defaults: &BookingDefaults) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            appointment_type: AppointmentType::InPerson,
            location: defaults.location.clone(),
            worker: ANY_WORKER.to_string(),
            service_type: defaults.service_type,
            duration: defaults.duration,
            description: String::new(),
        }
    }

    /// Whether every required contact field is filled in.
    pub fn has_contact_details(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.phone.is_empty()
    }
}

/// Parameters of one available-slots lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub service_type: ServiceType,
    pub appointment_type: AppointmentType,
}

/// Backend answer to an available-slots lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailableSlots {
    #[serde(default)]
    pub available_slots: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_slots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booked_slots: Option<u32>,
    /// Degraded-mode notice from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub date: NaiveDate,
    pub time: String,
    pub appointment_type: AppointmentType,
    pub location: Option<String>,
    pub worker: Option<String>,
    pub service_type: ServiceType,
    pub duration: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body of `POST /api/appointments`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppointmentRequest {
    pub customer: CustomerInfo,
    pub appointment: AppointmentDetails,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

/// Appointment record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Appointment {
    pub id: String,
    pub customer: CustomerInfo,
    pub appointment: AppointmentDetails,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<String>,
    #[serde(default)]
    pub email_sent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_type_round_trip_names() {
        for service in ServiceType::ALL {
            assert_eq!(service.as_str().parse::<ServiceType>().unwrap(), service);
        }
        assert!("astrology".parse::<ServiceType>().is_err());
    }

    #[test]
    fn test_request_wire_shape() {
        let request = AppointmentRequest {
            customer: CustomerInfo {
                name: "Jane".into(),
                email: "jane@example.com".into(),
                phone: "+250788123456".into(),
                country: Some("Rwanda".into()),
            },
            appointment: AppointmentDetails {
                date: NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
                time: "09:30".into(),
                appointment_type: AppointmentType::Virtual,
                location: None,
                worker: None,
                service_type: ServiceType::WorkPermit,
                duration: 45,
                notes: Some(String::new()),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["appointment"]["date"], "2026-11-02");
        assert_eq!(json["appointment"]["appointment_type"], "virtual");
        assert_eq!(json["appointment"]["service_type"], "work_permit");
        assert!(json["appointment"]["location"].is_null());
        assert_eq!(json["customer"]["country"], "Rwanda");
    }

    #[test]
    fn test_available_slots_tolerates_extra_fields() {
        let slots: AvailableSlots = serde_json::from_str(
            r#"{"date":"2026-11-02","service_type":"visa_consultation",
                "available_slots":["09:00","09:30"],"total_slots":16,
                "booked_slots":14,"available_count":2}"#,
        )
        .unwrap();
        assert_eq!(slots.available_slots, vec!["09:00", "09:30"]);
        assert_eq!(slots.booked_slots, Some(14));
    }

    #[test]
    fn test_appointment_record_defaults() {
        let record: Appointment = serde_json::from_str(
            r#"{"id":"abc","customer":{"name":"J","email":"j@x.io","phone":"0788123456"},
                "appointment":{"date":"2026-11-02","time":"10:00","appointment_type":"in_person",
                "location":"Kigali","worker":null,"service_type":"general_inquiry","duration":30}}"#,
        )
        .unwrap();
        assert_eq!(record.status, AppointmentStatus::Pending);
        assert_eq!(record.appointment.notes, None);
    }
}
