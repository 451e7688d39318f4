// src/models/mod.rs

//! Domain models for the booking client.
//!
//! This module contains all data structures used throughout the library,
//! organized by their primary purpose.

mod appointment;
mod catalog;
mod config;
mod pilgrimage;
mod search;

// Re-export all public types
pub use appointment::{
    ANY_WORKER, Appointment, AppointmentDetails, AppointmentForm, AppointmentRequest,
    AppointmentStatus, AppointmentType, AvailableSlots, CustomerInfo, DURATION_CHOICES, ServiceType,
    SlotQuery,
};
pub use catalog::{
    Catalog, ContactInfo, KeywordRoute, NavItem, NavLink, ServiceEntry, Testimonial,
    TestimonialKind,
};
pub use config::{API_URL_ENV, ApiConfig, BookingDefaults, Config, LoggingConfig, SessionConfig};
pub use pilgrimage::{
    ApplicationSummary, PilgrimageApplication, PilgrimageBooking, PilgrimageBookingInfo,
    PilgrimageCustomer, PilgrimageField, PilgrimageRequest,
};
pub use search::{ResultKind, SearchResult};
