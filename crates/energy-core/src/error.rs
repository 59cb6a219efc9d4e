use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the energy dashboard.
#[derive(Error, Debug)]
pub enum EnergyError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// No usage data file exists at any of the searched locations.
    #[error("No energy data file found (searched {0} locations)")]
    DataFileNotFound(usize),

    /// A home id was requested that does not exist in the loaded dataset.
    #[error("Home {home_id} not found; available homes: {}", available.join(", "))]
    HomeNotFound {
        home_id: String,
        available: Vec<String>,
    },

    /// The supplied password does not match the home id.
    #[error("Invalid credentials for home {0}")]
    InvalidCredentials(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, EnergyError>;
