// src/services/pilgrimage.rs

//! Pilgrimage application controller.
//!
//! Field-level validation runs before anything leaves the process; only
//! required fields block submission. A successful submission hands the
//! applicant's identity to the confirmation view through the session store.

use regex::Regex;

use crate::backend::BookingBackend;
use crate::error::{AppError, FieldErrors, Result};
use crate::models::{
    ApplicationSummary, PilgrimageApplication, PilgrimageBooking, PilgrimageField,
    PilgrimageRequest,
};
use crate::storage::{ConfirmationHandoff, SessionStore};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const INVALID_PHONE_MESSAGE: &str = "Please enter a valid phone number";
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit application. Please try again.";

/// Route of the confirmation view.
pub const CONFIRMATION_ROUTE: &str = "/application-submitted";

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[\d\s\-\+\(\)]+$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PilgrimagePhase {
    Editing,
    Submitting,
    Submitted { booking_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PilgrimageOutcome {
    /// Navigate to `route`; the summary has been handed off.
    Submitted {
        booking_id: String,
        route: &'static str,
    },
    Rejected { message: String },
}

/// Shape checks for contact fields.
#[derive(Debug, Clone)]
struct FieldRules {
    email: Regex,
    phone: Regex,
}

impl FieldRules {
    fn new() -> Result<Self> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
        })
    }

    /// Every field error for `application`, keyed by wire name.
    fn check(&self, application: &PilgrimageApplication) -> FieldErrors {
        let mut errors = FieldErrors::new();

        for field in PilgrimageField::REQUIRED {
            if application.get(field).trim().is_empty() {
                errors.insert(field.as_str().to_string(), REQUIRED_MESSAGE.to_string());
            }
        }

        let email = application.email.trim();
        if !email.is_empty() && !self.email.is_match(email) {
            errors.insert(
                PilgrimageField::Email.as_str().to_string(),
                INVALID_EMAIL_MESSAGE.to_string(),
            );
        }

        let phone = application.phone.trim();
        if !phone.is_empty() && !self.phone.is_match(phone) {
            errors.insert(
                PilgrimageField::Phone.as_str().to_string(),
                INVALID_PHONE_MESSAGE.to_string(),
            );
        }

        errors
    }
}

#[derive(Debug, Clone)]
pub struct PilgrimageController {
    rules: FieldRules,
    application: PilgrimageApplication,
    errors: FieldErrors,
    phase: PilgrimagePhase,
    submit_error: Option<String>,
}

impl PilgrimageController {
    pub fn new() -> Result<Self> {
        Self::with_application(PilgrimageApplication::default())
    }

    /// Start from prefilled values, e.g. loaded from a file.
    pub fn with_application(application: PilgrimageApplication) -> Result<Self> {
        Ok(Self {
            rules: FieldRules::new()?,
            application,
            errors: FieldErrors::new(),
            phase: PilgrimagePhase::Editing,
            submit_error: None,
        })
    }

    pub fn application(&self) -> &PilgrimageApplication {
        &self.application
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn field_error(&self, field: PilgrimageField) -> Option<&str> {
        self.errors.get(field.as_str()).map(String::as_str)
    }

    pub fn phase(&self) -> &PilgrimagePhase {
        &self.phase
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Edit one field; its pending error goes away.
    pub fn set(&mut self, field: PilgrimageField, value: impl Into<String>) {
        self.application.set(field, value);
        self.errors.remove(field.as_str());
    }

    /// Recompute field errors. Returns whether the form may be submitted.
    pub fn validate(&mut self) -> bool {
        self.errors = self.rules.check(&self.application);
        self.errors.is_empty()
    }

    /// Validate and move to `Submitting`, producing the request body.
    pub fn begin_submit(&mut self) -> Result<PilgrimageRequest> {
        if self.phase != PilgrimagePhase::Editing {
            return Err(AppError::validation("A submission is already in progress"));
        }
        if !self.validate() {
            log::debug!("Application has {} invalid field(s)", self.errors.len());
            return Err(AppError::Fields(self.errors.clone()));
        }
        self.submit_error = None;
        self.phase = PilgrimagePhase::Submitting;
        Ok(self.application.to_request())
    }

    /// Apply the backend's answer to a submission.
    pub fn complete_submit(&mut self, outcome: Result<PilgrimageBooking>) -> PilgrimageOutcome {
        match outcome {
            Ok(booking) => {
                log::info!("Pilgrimage booking {} created", booking.id);
                self.phase = PilgrimagePhase::Submitted {
                    booking_id: booking.id.clone(),
                };
                PilgrimageOutcome::Submitted {
                    booking_id: booking.id,
                    route: CONFIRMATION_ROUTE,
                }
            }
            Err(e) => {
                log::warn!("Pilgrimage submission failed: {}", e);
                let message = e.user_message(SUBMIT_FALLBACK_MESSAGE);
                self.phase = PilgrimagePhase::Editing;
                self.submit_error = Some(message.clone());
                PilgrimageOutcome::Rejected { message }
            }
        }
    }

    /// Summary handed to the confirmation view.
    pub fn summary(&self) -> ApplicationSummary {
        let booking_id = match &self.phase {
            PilgrimagePhase::Submitted { booking_id } => Some(booking_id.clone()),
            _ => None,
        };
        ApplicationSummary::from_application(&self.application, booking_id)
    }

    /// Submit and, on success, write the hand-off for the confirmation view.
    ///
    /// Field errors are returned as `Err(AppError::Fields)` without any
    /// network call.
    pub async fn submit(
        &mut self,
        backend: &dyn BookingBackend,
        store: &dyn SessionStore,
    ) -> Result<PilgrimageOutcome> {
        let request = self.begin_submit()?;
        let outcome = self.complete_submit(backend.create_pilgrimage_booking(&request).await);

        if matches!(outcome, PilgrimageOutcome::Submitted { .. }) {
            // The confirmation view tolerates a missing hand-off.
            if let Err(e) = ConfirmationHandoff::new(store).write(&self.summary()).await {
                log::warn!("Failed to store application hand-off: {}", e);
            }
        }
        Ok(outcome)
    }
}
