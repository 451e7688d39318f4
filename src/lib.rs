// src/lib.rs

//! CardX Academia booking client library.
//!
//! Catalogue search, appointment slot selection and submission, and the
//! pilgrimage application flow, written against a thin booking backend.

pub mod backend;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;
