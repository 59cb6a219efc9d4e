//! Core domain layer for the energy dashboard.
//!
//! Holds the flat record model, the pure aggregation engine, the lenient
//! field-parsing policy applied at the ingestion boundary, display
//! formatting, the error taxonomy and CLI settings.

pub mod analytics;
pub mod error;
pub mod formatting;
pub mod models;
pub mod parse;
pub mod settings;
