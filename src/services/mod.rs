// src/services/mod.rs

//! Controllers for the site's interactive features.
//!
//! - Catalogue search (`SearchIndex`, `SearchSession`)
//! - Slot availability (`SlotTracker`)
//! - Appointment booking (`AppointmentController`)
//! - Pilgrimage applications (`PilgrimageController`)
//! - Testimonial carousel (`Carousel`)

pub mod appointment;
pub mod carousel;
pub mod pilgrimage;
pub mod search;
pub mod slots;

pub use appointment::{AppointmentController, Phase, SubmitOutcome};
pub use carousel::Carousel;
pub use pilgrimage::{PilgrimageController, PilgrimageOutcome, PilgrimagePhase};
pub use search::{SearchIndex, SearchSession};
pub use slots::{SlotTicket, SlotTracker, SlotUpdate};
