// src/utils/date.rs

//! Calendar helpers for the booking form.

use chrono::{Local, NaiveDate};

use crate::error::{AppError, Result};

/// Wire format for dates: `yyyy-MM-dd`.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Format a date for the backend.
pub fn iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

/// Parse a `yyyy-MM-dd` date.
pub fn parse_iso(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date '{value}'. Use YYYY-MM-DD")))
}

/// Long human form, e.g. "November 02, 2026".
pub fn display(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Today in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether `date` lies strictly before `today`.
pub fn is_past(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}
