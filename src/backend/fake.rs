// src/backend/fake.rs

//! In-memory backend for controller tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::backend::{BookingBackend, HealthStatus};
use crate::error::{AppError, Result};
use crate::models::{
    Appointment, AppointmentRequest, AppointmentStatus, AvailableSlots, PilgrimageBooking,
    PilgrimageRequest, SlotQuery,
};

pub(crate) const CONFLICT_MESSAGE: &str =
    "This time slot is already booked. Please choose another time.";

#[derive(Default)]
struct State {
    open: HashMap<NaiveDate, Vec<String>>,
    failures: VecDeque<AppError>,
    appointments: HashMap<String, Appointment>,
    pilgrimages: HashMap<String, PilgrimageBooking>,
    slot_queries: Vec<SlotQuery>,
    appointment_requests: Vec<AppointmentRequest>,
    pilgrimage_requests: Vec<PilgrimageRequest>,
    next_id: u32,
}

/// Backend that keeps a per-date slot list and books against it.
#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<State>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open slots for `date`.
    pub fn with_slots(self, date: NaiveDate, labels: &[&str]) -> Self {
        self.state
            .lock()
            .unwrap()
            .open
            .insert(date, labels.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: AppError) {
        self.state.lock().unwrap().failures.push_back(error);
    }

    /// Book a slot behind the client's back.
    pub fn take_slot(&self, date: NaiveDate, label: &str) {
        if let Some(open) = self.state.lock().unwrap().open.get_mut(&date) {
            open.retain(|s| s != label);
        }
    }

    pub fn slot_queries(&self) -> Vec<SlotQuery> {
        self.state.lock().unwrap().slot_queries.clone()
    }

    pub fn appointment_requests(&self) -> Vec<AppointmentRequest> {
        self.state.lock().unwrap().appointment_requests.clone()
    }

    pub fn pilgrimage_requests(&self) -> Vec<PilgrimageRequest> {
        self.state.lock().unwrap().pilgrimage_requests.clone()
    }

    fn pop_failure(state: &mut State) -> Result<()> {
        match state.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn not_found(what: &str) -> AppError {
        AppError::server(404, Some(format!("{what} not found")))
    }
}

#[async_trait]
impl BookingBackend for FakeBackend {
    async fn available_slots(&self, query: &SlotQuery) -> Result<AvailableSlots> {
        let mut state = self.state.lock().unwrap();
        state.slot_queries.push(*query);
        Self::pop_failure(&mut state)?;

        let available = state.open.get(&query.date).cloned().unwrap_or_default();
        Ok(AvailableSlots {
            available_slots: available,
            date: Some(query.date.to_string()),
            ..AvailableSlots::default()
        })
    }

    async fn create_appointment(&self, request: &AppointmentRequest) -> Result<Appointment> {
        let mut state = self.state.lock().unwrap();
        state.appointment_requests.push(request.clone());
        Self::pop_failure(&mut state)?;

        let date = request.appointment.date;
        let time = &request.appointment.time;
        let open = state.open.entry(date).or_default();
        if !open.contains(time) {
            return Err(AppError::server(400, Some(CONFLICT_MESSAGE.to_string())));
        }
        open.retain(|s| s != time);

        state.next_id += 1;
        let appointment = Appointment {
            id: format!("apt-{}", state.next_id),
            customer: request.customer.clone(),
            appointment: request.appointment.clone(),
            status: AppointmentStatus::Pending,
            created_at: Some("2026-10-19T10:00:00Z".into()),
            cancelled_at: None,
            email_sent: true,
        };
        state
            .appointments
            .insert(appointment.id.clone(), appointment.clone());
        Ok(appointment)
    }

    async fn get_appointment(&self, id: &str) -> Result<Appointment> {
        let mut state = self.state.lock().unwrap();
        Self::pop_failure(&mut state)?;
        state
            .appointments
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("Appointment"))
    }

    async fn cancel_appointment(&self, id: &str) -> Result<Appointment> {
        let mut state = self.state.lock().unwrap();
        Self::pop_failure(&mut state)?;
        let record = state
            .appointments
            .get_mut(id)
            .ok_or_else(|| Self::not_found("Appointment"))?;
        record.status = AppointmentStatus::Cancelled;
        record.cancelled_at = Some("2026-10-19T11:00:00Z".into());
        let record = record.clone();

        state
            .open
            .entry(record.appointment.date)
            .or_default()
            .push(record.appointment.time.clone());
        Ok(record)
    }

    async fn create_pilgrimage_booking(
        &self,
        request: &PilgrimageRequest,
    ) -> Result<PilgrimageBooking> {
        let mut state = self.state.lock().unwrap();
        state.pilgrimage_requests.push(request.clone());
        Self::pop_failure(&mut state)?;

        state.next_id += 1;
        let booking = PilgrimageBooking {
            id: format!("pil-{}", state.next_id),
            customer: request.customer.clone(),
            booking: request.booking.clone(),
            status: Some("pending".into()),
            created_at: Some("2026-10-19T10:00:00Z".into()),
        };
        state.pilgrimages.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn get_pilgrimage_booking(&self, id: &str) -> Result<PilgrimageBooking> {
        let mut state = self.state.lock().unwrap();
        Self::pop_failure(&mut state)?;
        state
            .pilgrimages
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("Pilgrimage booking"))
    }

    async fn health(&self) -> Result<HealthStatus> {
        let mut state = self.state.lock().unwrap();
        Self::pop_failure(&mut state)?;
        Ok(HealthStatus {
            status: "healthy".into(),
            server: "running".into(),
            database: "connected".into(),
            email_service: "configured".into(),
            ..HealthStatus::default()
        })
    }
}
