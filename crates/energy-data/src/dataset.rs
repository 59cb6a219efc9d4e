//! Per-home views over a loaded record set, plus the sign-in check.

use energy_core::error::{EnergyError, Result};
use energy_core::models::EnergyRecord;
use tracing::info;

/// A loaded record set with per-home access.
///
/// Holds the flat record list and answers home-scoped queries by filtering.
/// Home ids are reported in first-appearance order, matching how grouped
/// aggregates order their keys.
#[derive(Debug, Clone)]
pub struct EnergyDataset {
    records: Vec<EnergyRecord>,
}

impl EnergyDataset {
    pub fn new(records: Vec<EnergyRecord>) -> Self {
        Self { records }
    }

    /// All records across every home.
    pub fn records(&self) -> &[EnergyRecord] {
        &self.records
    }

    /// Distinct home ids in first-appearance order.
    pub fn home_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for record in &self.records {
            if !ids.contains(&record.home_id) {
                ids.push(record.home_id.clone());
            }
        }
        ids
    }

    /// The records belonging to `home_id`, in dataset order.
    pub fn records_for_home(&self, home_id: &str) -> Vec<EnergyRecord> {
        self.records
            .iter()
            .filter(|r| r.home_id == home_id)
            .cloned()
            .collect()
    }

    /// The household size for `home_id`, taken from its first record.
    /// Unknown homes report a size of 1.
    pub fn household_size(&self, home_id: &str) -> u32 {
        self.records
            .iter()
            .find(|r| r.home_id == home_id)
            .map(|r| r.household_size)
            .unwrap_or(1)
    }

    /// Validate credentials and return the home's records.
    ///
    /// A home signs in with its own id as the password. Unknown homes fail
    /// with the list of available ids; a wrong password for a known home
    /// fails without it.
    pub fn login(&self, home_id: &str, password: &str) -> Result<Vec<EnergyRecord>> {
        let available = self.home_ids();
        if !available.iter().any(|id| id == home_id) {
            return Err(EnergyError::HomeNotFound {
                home_id: home_id.to_string(),
                available,
            });
        }
        if password != home_id {
            return Err(EnergyError::InvalidCredentials(home_id.to_string()));
        }

        let records = self.records_for_home(home_id);
        info!("Home {} signed in ({} records)", home_id, records.len());
        Ok(records)
    }
}
