//! Data access layer: JSON loading, flattening, and per-home views.
pub mod dataset;
pub mod loader;
pub mod sample;
