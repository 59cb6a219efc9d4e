//! Keyword-driven energy assistant.
//!
//! Classifies free-text questions into intents, renders data-backed answers
//! from a home's records, and runs the answer loop in a background task so
//! the UI can show a typing indicator while waiting.

pub mod engine;
pub mod intent;
pub mod responder;
