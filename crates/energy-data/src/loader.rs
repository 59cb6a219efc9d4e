//! JSON file discovery and loading for the energy dashboard.
//!
//! Reads the nested per-home document (`HomeID` / `HouseholdSize` /
//! `Records`) and flattens it into [`EnergyRecord`] structs for downstream
//! aggregation.

use std::path::{Path, PathBuf};

use energy_core::error::{EnergyError, Result};
use energy_core::models::EnergyRecord;
use energy_core::parse;
use tracing::{debug, warn};

/// File name searched for in the default locations.
pub const DATA_FILE_NAME: &str = "house_energy_data.json";

// ── Public API ────────────────────────────────────────────────────────────────

/// Flatten a nested energy document into per-record structs.
///
/// The document is an array of home objects, each carrying `HomeID`,
/// `HouseholdSize`, and a `Records` array. Home-level fields are denormalised
/// onto every record so the aggregation layer can work from a flat slice.
/// Malformed numeric fields degrade to their zero defaults rather than
/// failing the whole document; homes without a `Records` array contribute
/// nothing.
pub fn flatten_document(doc: &serde_json::Value) -> Vec<EnergyRecord> {
    let Some(homes) = doc.as_array() else {
        warn!("Energy document root is not an array");
        return Vec::new();
    };

    let mut records: Vec<EnergyRecord> = Vec::new();
    for home in homes {
        let home_id = match home.get("HomeID") {
            Some(v) => value_to_string(v),
            None => {
                debug!("Skipping home object without HomeID");
                continue;
            }
        };
        let household_size = home
            .get("HouseholdSize")
            .map(parse::parse_household_size)
            .unwrap_or(1);

        let Some(raw_records) = home.get("Records").and_then(|v| v.as_array()) else {
            debug!("Home {} has no Records array", home_id);
            continue;
        };

        for raw in raw_records {
            records.push(flatten_record(raw, &home_id, household_size));
        }
    }

    debug!("Flattened {} records from {} homes", records.len(), homes.len());
    records
}

/// Load and flatten the energy document at `path`.
pub fn load_records(path: &Path) -> Result<Vec<EnergyRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| EnergyError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: serde_json::Value = serde_json::from_str(&content)?;
    Ok(flatten_document(&doc))
}

/// Search the default locations for a data file, preferring an explicit
/// `--data-file` path when given.
///
/// Candidates, in order: the explicit path, `./house_energy_data.json`,
/// `./assets/house_energy_data.json`, `~/.energy-dashboard/house_energy_data.json`.
/// Fails with [`EnergyError::DataFileNotFound`] carrying the number of
/// locations searched.
pub fn discover_data_file(explicit: Option<&Path>) -> Result<PathBuf> {
    let candidates = candidate_paths(explicit);
    for candidate in &candidates {
        if candidate.is_file() {
            debug!("Using data file {}", candidate.display());
            return Ok(candidate.clone());
        }
    }
    Err(EnergyError::DataFileNotFound(candidates.len()))
}

/// Load records from the first discoverable data file, falling back to the
/// built-in sample dataset when none exists or the file cannot be read.
pub fn load_or_fallback(explicit: Option<&Path>) -> Vec<EnergyRecord> {
    let path = match discover_data_file(explicit) {
        Ok(path) => path,
        Err(e) => {
            warn!("{}; using built-in sample data", e);
            return crate::sample::sample_records();
        }
    };

    match load_records(&path) {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => {
            warn!(
                "Data file {} contains no records; using built-in sample data",
                path.display()
            );
            crate::sample::sample_records()
        }
        Err(e) => {
            warn!(
                "Failed to load {}: {}; using built-in sample data",
                path.display(),
                e
            );
            crate::sample::sample_records()
        }
    }
}

/// Find all `.json` files recursively under `dir`, sorted by path.
///
/// Used when a directory rather than a single file holds the exported
/// documents; every file's records are merged in path order.
pub fn find_json_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Data path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load and merge records from every `.json` file under `dir`.
pub fn load_records_from_dir(dir: &Path) -> Vec<EnergyRecord> {
    let mut all: Vec<EnergyRecord> = Vec::new();
    for file in find_json_files(dir) {
        match load_records(&file) {
            Ok(records) => all.extend(records),
            Err(e) => warn!("Skipping {}: {}", file.display(), e),
        }
    }
    all
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(p) = explicit {
        candidates.push(p.to_path_buf());
    }
    candidates.push(PathBuf::from(DATA_FILE_NAME));
    candidates.push(PathBuf::from("assets").join(DATA_FILE_NAME));
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    candidates.push(home.join(".energy-dashboard").join(DATA_FILE_NAME));
    candidates
}

/// Flatten a single raw record, denormalising the home-level fields.
fn flatten_record(raw: &serde_json::Value, home_id: &str, household_size: u32) -> EnergyRecord {
    EnergyRecord {
        home_id: home_id.to_string(),
        appliance: string_field(raw, "ApplianceType"),
        energy_kwh: raw
            .get("EnergyConsumption(kWh)")
            .map(parse::parse_kwh_or_zero)
            .unwrap_or(0.0),
        time: string_field(raw, "Time"),
        date: string_field(raw, "Date"),
        outdoor_temp_c: raw
            .get("OutdoorTemperature(°C)")
            .map(parse::parse_temp_or_zero)
            .unwrap_or(0.0),
        season: string_field(raw, "Season"),
        household_size,
    }
}

fn string_field(raw: &serde_json::Value, key: &str) -> String {
    raw.get(key)
        .map(value_to_string)
        .unwrap_or_default()
}

/// Coerce a JSON value to its string form: strings pass through unquoted,
/// numbers use their display form. Home ids appear as both in the wild.
fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
