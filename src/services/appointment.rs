// src/services/appointment.rs

//! Appointment booking controller.
//!
//! ```text
//! Editing ──begin_submit──▶ Submitting ──ok──▶ Submitted ──book_another──▶ Editing
//!    ▲                          │
//!    └──────────err─────────────┘   (slot conflict also refetches slots)
//! ```
//!
//! Transitions are plain methods on owned state; the async drivers at the
//! bottom only glue them to a [`BookingBackend`].

use chrono::NaiveDate;

use crate::backend::BookingBackend;
use crate::error::{AppError, Result};
use crate::models::{
    ANY_WORKER, Appointment, AppointmentDetails, AppointmentForm, AppointmentRequest,
    AppointmentType, BookingDefaults, CustomerInfo, DURATION_CHOICES, ServiceType, SlotQuery,
};
use crate::services::slots::{SlotTicket, SlotTracker, SlotUpdate};
use crate::utils::date;

pub const MISSING_DATE_TIME_MESSAGE: &str = "Please select a date and time";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to create appointment. Please try again.";
pub const SLOTS_NOT_READY_MESSAGE: &str = "Time slots for the selected date are not loaded yet";

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Editing,
    Submitting,
    Submitted {
        appointment_id: String,
        email: String,
    },
}

/// Result of a finished submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted { appointment_id: String },
    /// Back in editing; `refetch` is set when the slot set must be reloaded.
    Rejected {
        message: String,
        refetch: Option<SlotQuery>,
    },
}

/// Owns the appointment form, its slot set and the submission phase.
#[derive(Debug, Clone)]
pub struct AppointmentController {
    defaults: BookingDefaults,
    form: AppointmentForm,
    slots: SlotTracker,
    selected_date: NaiveDate,
    today: NaiveDate,
    phase: Phase,
    error: Option<String>,
}

impl AppointmentController {
    /// Fresh form with `today` as the selected date.
    pub fn new(defaults: BookingDefaults, today: NaiveDate) -> Self {
        Self {
            form: AppointmentForm::from_defaults(&defaults),
            defaults,
            slots: SlotTracker::new(),
            selected_date: today,
            today,
            phase: Phase::Editing,
            error: None,
        }
    }

    pub fn form(&self) -> &AppointmentForm {
        &self.form
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn slots(&self) -> &SlotTracker {
        &self.slots
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.slots.selected()
    }

    /// Whether the submit action should be offered.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Editing
    }

    /// Parameters for the slot set matching the current selection.
    pub fn slot_query(&self) -> SlotQuery {
        SlotQuery {
            date: self.selected_date,
            service_type: self.form.service_type,
            appointment_type: self.form.appointment_type,
        }
    }

    // --- Field edits ---

    fn edit(&mut self, apply: impl FnOnce(&mut AppointmentForm)) {
        apply(&mut self.form);
        self.error = None;
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|f| f.name = value);
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|f| f.email = value);
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|f| f.phone = value);
    }

    pub fn set_location(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|f| f.location = value);
    }

    pub fn set_worker(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|f| f.worker = value);
    }

    pub fn set_description(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.edit(|f| f.description = value);
    }

    pub fn set_duration(&mut self, minutes: u32) -> Result<()> {
        if !DURATION_CHOICES.contains(&minutes) {
            return Err(AppError::validation(format!(
                "Duration must be one of {DURATION_CHOICES:?} minutes"
            )));
        }
        self.edit(|f| f.duration = minutes);
        Ok(())
    }

    /// Change the appointment type.
    ///
    /// The slot set is not refetched: the type is sent with the next lookup
    /// but does not trigger one by itself.
    pub fn set_appointment_type(&mut self, value: AppointmentType) {
        self.edit(|f| f.appointment_type = value);
    }

    /// Change the service type; the returned query must be fetched.
    ///
    /// The old slot set and time selection are dropped on a change.
    pub fn set_service_type(&mut self, value: ServiceType) -> Option<SlotQuery> {
        if self.form.service_type == value {
            return None;
        }
        self.edit(|f| f.service_type = value);
        self.slots.reset();
        Some(self.slot_query())
    }

    // --- Calendar ---

    /// Pick a date. Past dates are refused; the slot set and time selection
    /// are dropped until the returned query is fetched.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<SlotQuery> {
        if date::is_past(date, self.today) {
            return Err(AppError::validation(format!(
                "{} is in the past",
                date::display(date)
            )));
        }
        self.selected_date = date;
        self.slots.reset();
        Ok(self.slot_query())
    }

    /// Whether the held slot set was fetched for the current date and
    /// service and no newer lookup is pending.
    ///
    /// The appointment type is left out: changing it does not refetch.
    pub fn slots_ready(&self) -> bool {
        !self.slots.is_loading()
            && self.slots.query().is_some_and(|q| {
                q.date == self.selected_date && q.service_type == self.form.service_type
            })
    }

    /// Pick a time label from the current slot set.
    pub fn select_time(&mut self, label: &str) -> Result<()> {
        if !self.slots_ready() {
            return Err(AppError::validation(SLOTS_NOT_READY_MESSAGE));
        }
        self.slots.select(label)
    }

    pub fn begin_slot_fetch(&mut self) -> SlotTicket {
        self.error = None;
        self.slots.begin(self.slot_query())
    }

    pub fn complete_slot_fetch(
        &mut self,
        ticket: SlotTicket,
        outcome: Result<Vec<String>>,
    ) -> SlotUpdate {
        let update = self.slots.complete(ticket, outcome);
        if let SlotUpdate::Failed { message } = &update {
            self.error = Some(message.clone());
        }
        update
    }

    // --- Submission ---

    /// Validate and move to `Submitting`, producing the request body.
    ///
    /// Validation failures stay in `Editing` and make no network call.
    pub fn begin_submit(&mut self) -> Result<AppointmentRequest> {
        if self.phase != Phase::Editing {
            return Err(AppError::validation("A submission is already in progress"));
        }

        let ready = self.slots_ready();
        let Some(time) = self
            .slots
            .selected()
            .filter(|t| ready && self.slots.contains(t))
            .map(str::to_string)
        else {
            return Err(self.reject(MISSING_DATE_TIME_MESSAGE));
        };
        if !self.form.has_contact_details() {
            return Err(self.reject(MISSING_FIELDS_MESSAGE));
        }

        let form = &self.form;
        let request = AppointmentRequest {
            customer: CustomerInfo {
                name: form.name.clone(),
                email: form.email.clone(),
                phone: form.phone.clone(),
                country: Some(self.defaults.country.clone()),
            },
            appointment: AppointmentDetails {
                date: self.selected_date,
                time,
                appointment_type: form.appointment_type,
                location: (form.appointment_type == AppointmentType::InPerson)
                    .then(|| form.location.clone()),
                worker: (!form.worker.is_empty() && form.worker != ANY_WORKER)
                    .then(|| form.worker.clone()),
                service_type: form.service_type,
                duration: form.duration,
                notes: Some(form.description.clone()),
            },
        };

        self.error = None;
        self.phase = Phase::Submitting;
        Ok(request)
    }

    fn reject(&mut self, message: &str) -> AppError {
        self.error = Some(message.to_string());
        AppError::validation(message)
    }

    /// Apply the backend's answer to a submission.
    pub fn complete_submit(&mut self, outcome: Result<Appointment>) -> SubmitOutcome {
        match outcome {
            Ok(appointment) => {
                log::info!("Appointment {} created", appointment.id);
                let email = self.form.email.clone();
                self.clear_form();
                self.phase = Phase::Submitted {
                    appointment_id: appointment.id.clone(),
                    email,
                };
                SubmitOutcome::Submitted {
                    appointment_id: appointment.id,
                }
            }
            Err(e) => {
                log::warn!("Appointment submission failed: {}", e);
                let message = e.user_message(SUBMIT_FALLBACK_MESSAGE);
                self.phase = Phase::Editing;
                self.error = Some(message.clone());
                let refetch = e.is_slot_conflict().then(|| self.slot_query());
                SubmitOutcome::Rejected { message, refetch }
            }
        }
    }

    /// Leave the confirmation and start a new booking.
    ///
    /// Returns the query for today's slots, which must be fetched, or
    /// `None` when there was no confirmation to leave.
    pub fn book_another(&mut self) -> Option<SlotQuery> {
        if !matches!(self.phase, Phase::Submitted { .. }) {
            return None;
        }
        self.phase = Phase::Editing;
        self.error = None;
        Some(self.slot_query())
    }

    /// Discard everything and start over; the returned query must be fetched.
    pub fn reset(&mut self) -> SlotQuery {
        self.clear_form();
        self.phase = Phase::Editing;
        self.slot_query()
    }

    fn clear_form(&mut self) {
        self.form = AppointmentForm::from_defaults(&self.defaults);
        self.selected_date = self.today;
        self.slots.reset();
        self.error = None;
    }

    // --- Async drivers ---

    /// Fetch slots for the current selection.
    pub async fn load_slots(&mut self, backend: &dyn BookingBackend) -> SlotUpdate {
        let ticket = self.begin_slot_fetch();
        let outcome = backend
            .available_slots(&ticket.query)
            .await
            .map(|r| r.available_slots);
        self.complete_slot_fetch(ticket, outcome)
    }

    /// Submit the form, reloading slots after a slot conflict.
    ///
    /// Local validation failures are returned as `Err`; backend rejections
    /// come back as [`SubmitOutcome::Rejected`].
    pub async fn submit(&mut self, backend: &dyn BookingBackend) -> Result<SubmitOutcome> {
        let request = self.begin_submit()?;
        let outcome = self.complete_submit(backend.create_appointment(&request).await);

        if let SubmitOutcome::Rejected {
            refetch: Some(_), ..
        } = &outcome
        {
            log::info!("Slot conflict; reloading available slots");
            let message = self.error.clone();
            self.load_slots(backend).await;
            // Keep the conflict message visible unless the reload failed.
            if self.error.is_none() {
                self.error = message;
            }
        }
        Ok(outcome)
    }
}

/// Look up an existing appointment.
pub async fn find_appointment(backend: &dyn BookingBackend, id: &str) -> Result<Appointment> {
    backend.get_appointment(id.trim()).await
}

/// Cancel an existing appointment.
pub async fn cancel_appointment(backend: &dyn BookingBackend, id: &str) -> Result<Appointment> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::validation("Appointment id is required"));
    }
    let appointment = backend.cancel_appointment(id).await?;
    log::info!("Appointment {} cancelled", appointment.id);
    Ok(appointment)
}
