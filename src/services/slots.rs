// src/services/slots.rs

//! Available-slot tracking for the appointment form.
//!
//! Each lookup is issued a ticket. Only the most recently issued ticket may
//! update the slot set, so a slow response for an old date can never
//! overwrite the answer for the date the user is looking at now.

use crate::error::{AppError, Result};
use crate::models::SlotQuery;

/// Shown when a slot lookup fails without a more specific message.
pub const SLOTS_FALLBACK_MESSAGE: &str = "Failed to load time slots";

/// Handle for one in-flight slot lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTicket {
    seq: u64,
    pub query: SlotQuery,
}

/// What happened when a lookup completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotUpdate {
    /// Slot set replaced
    Loaded { count: usize },
    /// Lookup failed; slot set cleared and the message should be shown
    Failed { message: String },
    /// A newer lookup was issued meanwhile; nothing changed
    Stale,
}

/// Latest known slot set plus the selection that must stay inside it.
#[derive(Debug, Default, Clone)]
pub struct SlotTracker {
    slots: Vec<String>,
    /// Lookup the current slot set answers
    query: Option<SlotQuery>,
    selected: Option<String>,
    latest_seq: u64,
    loading: bool,
}

impl SlotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Parameters of the lookup that produced the current slot set.
    pub fn query(&self) -> Option<&SlotQuery> {
        self.query.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn contains(&self, label: &str) -> bool {
        self.slots.iter().any(|s| s == label)
    }

    /// Start a lookup. Any earlier ticket becomes stale.
    pub fn begin(&mut self, query: SlotQuery) -> SlotTicket {
        self.latest_seq += 1;
        self.loading = true;
        SlotTicket {
            seq: self.latest_seq,
            query,
        }
    }

    /// Whether `ticket` is still the current lookup.
    pub fn is_current(&self, ticket: &SlotTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Apply the outcome of a lookup.
    pub fn complete(&mut self, ticket: SlotTicket, outcome: Result<Vec<String>>) -> SlotUpdate {
        if !self.is_current(&ticket) {
            log::debug!(
                "Dropping stale slot response for {} (seq {} < {})",
                ticket.query.date,
                ticket.seq,
                self.latest_seq
            );
            return SlotUpdate::Stale;
        }
        self.loading = false;

        match outcome {
            Ok(slots) => {
                self.slots = slots;
                self.query = Some(ticket.query);
                if let Some(selected) = &self.selected {
                    if !self.contains(selected) {
                        log::info!("Selected time {} is no longer available", selected);
                        self.selected = None;
                    }
                }
                SlotUpdate::Loaded {
                    count: self.slots.len(),
                }
            }
            Err(error) => {
                log::warn!("Slot lookup for {} failed: {}", ticket.query.date, error);
                self.slots.clear();
                self.query = None;
                self.selected = None;
                SlotUpdate::Failed {
                    message: error.user_message(SLOTS_FALLBACK_MESSAGE),
                }
            }
        }
    }

    /// Select a time label from the current slot set.
    pub fn select(&mut self, label: &str) -> Result<()> {
        if !self.contains(label) {
            return Err(AppError::validation(format!(
                "{label} is not an available time"
            )));
        }
        self.selected = Some(label.to_string());
        Ok(())
    }

    /// Forget slots and selection, and invalidate in-flight lookups.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.query = None;
        self.selected = None;
        self.latest_seq += 1;
        self.loading = false;
    }
}
