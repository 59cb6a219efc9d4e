//! The aggregation engine: pure summaries over a household's records.
//!
//! Every function here maps an already-filtered record slice to a numeric
//! or grouped result with no side effects and no internal state. Grouped
//! results preserve first-appearance key order; consumers that need a
//! different ordering sort explicitly.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{EnergyRecord, MonthlyPoint, DEFAULT_PEAK_HOUR, NO_DATA};

// ── GroupedSums ───────────────────────────────────────────────────────────────

/// Running per-key sums that remember the order in which keys were first
/// seen. The max scan replaces only on strictly-greater sums, so among tied
/// keys the earliest-seen one wins. Both properties are part of the
/// engine's contract, not accidents of a map implementation.
#[derive(Debug)]
struct GroupedSums<K> {
    entries: Vec<(K, f64)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash + Clone> GroupedSums<K> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn add(&mut self, key: K, amount: f64) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += amount,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, amount));
            }
        }
    }

    /// The first-appearing entry with the maximal sum.
    fn max_entry(&self) -> Option<&(K, f64)> {
        let mut best: Option<&(K, f64)> = None;
        for entry in &self.entries {
            match best {
                Some(b) if entry.1 <= b.1 => {}
                _ => best = Some(entry),
            }
        }
        best
    }

    fn into_entries(self) -> Vec<(K, f64)> {
        self.entries
    }
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Sum of `energy_kwh` across all records. Empty input → 0.0.
pub fn total_consumption(records: &[EnergyRecord]) -> f64 {
    records.iter().map(|r| r.energy_kwh).sum()
}

/// Per-appliance consumption sums, keyed by the distinct appliance labels
/// present in the input, in first-appearance order.
pub fn consumption_by_appliance(records: &[EnergyRecord]) -> Vec<(String, f64)> {
    let mut groups = GroupedSums::new();
    for record in records {
        groups.add(record.appliance.clone(), record.energy_kwh);
    }
    groups.into_entries()
}

/// Per-season consumption sums, same grouping rule as
/// [`consumption_by_appliance`] keyed by the opaque season label.
pub fn consumption_by_season(records: &[EnergyRecord]) -> Vec<(String, f64)> {
    let mut groups = GroupedSums::new();
    for record in records {
        groups.add(record.season.clone(), record.energy_kwh);
    }
    groups.into_entries()
}

/// The appliance with the maximal summed consumption.
///
/// Empty input → `("No data", 0.0)`. Ties go to the appliance whose label
/// appeared first in the scan.
pub fn highest_consumption_appliance(records: &[EnergyRecord]) -> (String, f64) {
    let mut groups = GroupedSums::new();
    for record in records {
        groups.add(record.appliance.clone(), record.energy_kwh);
    }
    match groups.max_entry() {
        Some((appliance, kwh)) => (appliance.clone(), *kwh),
        None => (NO_DATA.to_string(), 0.0),
    }
}

/// The hour of day (0–23) with the maximal summed consumption.
///
/// Hours come from the leading integer of each record's `HH:MM` field;
/// minutes are ignored and records with an unparseable hour are excluded
/// from this grouping only. Empty input → `(12, 0.0)`. Ties go to the
/// hour value encountered first while scanning, not the numerically
/// smallest hour.
pub fn peak_usage_hour(records: &[EnergyRecord]) -> (u32, f64) {
    let mut groups = GroupedSums::new();
    for record in records {
        if let Some(hour) = record.hour() {
            groups.add(hour, record.energy_kwh);
        }
    }
    match groups.max_entry() {
        Some(&(hour, kwh)) => (hour, kwh),
        None => (DEFAULT_PEAK_HOUR, 0.0),
    }
}

/// Monthly consumption rollup, grouped by the `"M/YYYY"` key extracted
/// from each record's date, in first-appearance order.
///
/// Each month's sum is rounded to 2 decimal places here because this
/// aggregate feeds the chart directly; every other aggregate stays at full
/// precision until the formatting layer. Records with an unparseable date
/// are excluded.
pub fn monthly_consumption(records: &[EnergyRecord]) -> Vec<MonthlyPoint> {
    let mut groups = GroupedSums::new();
    for record in records {
        if let Some(key) = record.month_key() {
            groups.add(key, record.energy_kwh);
        }
    }
    groups
        .into_entries()
        .into_iter()
        .map(|(month, sum)| MonthlyPoint {
            month,
            consumption: crate::formatting::round2(sum),
        })
        .collect()
}

/// Average consumption per household member.
///
/// `household_size` is clamped to a minimum of 1: a size of zero is a
/// defined failure mode that must never reach the division.
pub fn per_person_average(records: &[EnergyRecord], household_size: u32) -> f64 {
    total_consumption(records) / f64::from(household_size.max(1))
}

/// Estimated cost at `rate_per_kwh` dollars per kilowatt-hour.
///
/// Callers without a configured rate use
/// [`crate::models::DEFAULT_RATE_PER_KWH`].
pub fn estimated_cost(records: &[EnergyRecord], rate_per_kwh: f64) -> f64 {
    total_consumption(records) * rate_per_kwh
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn record(appliance: &str, kwh: f64) -> EnergyRecord {
        EnergyRecord {
            home_id: "112".to_string(),
            appliance: appliance.to_string(),
            energy_kwh: kwh,
            time: "12:00".to_string(),
            date: "2023-04-28".to_string(),
            outdoor_temp_c: 21.6,
            season: "Summer".to_string(),
            household_size: 4,
        }
    }

    fn record_at(appliance: &str, kwh: f64, time: &str, date: &str, season: &str) -> EnergyRecord {
        EnergyRecord {
            time: time.to_string(),
            date: date.to_string(),
            season: season.to_string(),
            ..record(appliance, kwh)
        }
    }

    /// The three-record worked example used throughout the data contract.
    fn sample() -> Vec<EnergyRecord> {
        vec![
            record_at("Dishwasher", 4.06, "16:10", "2023-04-28", "Summer"),
            record_at("Computer", 1.88, "13:54", "2023-12-16", "Fall"),
            record_at("Computer", 1.87, "13:59", "2023-10-07", "Winter"),
        ]
    }

    // ── total_consumption ────────────────────────────────────────────────────

    #[test]
    fn test_total_consumption_sums_all_records() {
        assert!((total_consumption(&sample()) - 7.81).abs() < 1e-9);
    }

    #[test]
    fn test_total_consumption_empty_is_zero() {
        assert_eq!(total_consumption(&[]), 0.0);
    }

    #[test]
    fn test_total_consumption_zero_records_allowed() {
        let records = vec![record("Fridge", 0.0), record("Fridge", 0.0)];
        assert_eq!(total_consumption(&records), 0.0);
    }

    // ── consumption_by_appliance ─────────────────────────────────────────────

    #[test]
    fn test_by_appliance_groups_and_sums() {
        let grouped = consumption_by_appliance(&sample());
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped[0].0, "Dishwasher");
        assert!((grouped[0].1 - 4.06).abs() < 1e-9);
        assert_eq!(grouped[1].0, "Computer");
        assert!((grouped[1].1 - 3.75).abs() < 1e-9);
    }

    #[test]
    fn test_by_appliance_first_appearance_order() {
        let records = vec![
            record("Oven", 1.0),
            record("Lights", 2.0),
            record("Oven", 3.0),
        ];
        let keys: Vec<String> = consumption_by_appliance(&records)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["Oven", "Lights"]);
    }

    #[test]
    fn test_by_appliance_empty() {
        assert!(consumption_by_appliance(&[]).is_empty());
    }

    #[test]
    fn test_by_appliance_no_zero_filled_keys() {
        // Only labels actually present appear.
        let grouped = consumption_by_appliance(&[record("Heater", 9.0)]);
        assert_eq!(grouped.len(), 1);
    }

    // ── consumption_by_season ────────────────────────────────────────────────

    #[test]
    fn test_by_season_groups() {
        let grouped = consumption_by_season(&sample());
        assert_eq!(grouped.len(), 3);
        assert_eq!(grouped[0].0, "Summer");
        assert_eq!(grouped[1].0, "Fall");
        assert_eq!(grouped[2].0, "Winter");
    }

    #[test]
    fn test_by_season_opaque_labels_accepted() {
        // Season is not validated against a fixed set.
        let records = vec![record_at("Fan", 1.0, "10:00", "2023-06-01", "Monsoon")];
        let grouped = consumption_by_season(&records);
        assert_eq!(grouped[0].0, "Monsoon");
    }

    // ── partition consistency ────────────────────────────────────────────────

    #[test]
    fn test_partitions_sum_to_total() {
        let records = sample();
        let total = total_consumption(&records);
        let by_appliance: f64 = consumption_by_appliance(&records)
            .iter()
            .map(|(_, v)| v)
            .sum();
        let by_season: f64 = consumption_by_season(&records).iter().map(|(_, v)| v).sum();
        assert!((total - by_appliance).abs() < 1e-9);
        assert!((total - by_season).abs() < 1e-9);
    }

    // ── highest_consumption_appliance ────────────────────────────────────────

    #[test]
    fn test_highest_appliance() {
        let (appliance, kwh) = highest_consumption_appliance(&sample());
        // Dishwasher has the single largest record but Computer's summed
        // 3.75 is checked against Dishwasher's 4.06.
        assert_eq!(appliance, "Dishwasher");
        assert!((kwh - 4.06).abs() < 1e-9);
    }

    #[test]
    fn test_highest_appliance_sums_before_comparing() {
        let records = vec![
            record("Dishwasher", 2.0),
            record("Computer", 1.5),
            record("Computer", 1.5),
        ];
        let (appliance, kwh) = highest_consumption_appliance(&records);
        assert_eq!(appliance, "Computer");
        assert!((kwh - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_highest_appliance_empty_sentinel() {
        assert_eq!(
            highest_consumption_appliance(&[]),
            ("No data".to_string(), 0.0)
        );
    }

    #[test]
    fn test_highest_appliance_tie_goes_to_first_seen() {
        let records = vec![
            record("Oven", 2.5),
            record("Lights", 2.5),
            record("Heater", 1.0),
        ];
        let (appliance, _) = highest_consumption_appliance(&records);
        assert_eq!(appliance, "Oven");
    }

    // ── peak_usage_hour ──────────────────────────────────────────────────────

    #[test]
    fn test_peak_hour() {
        let (hour, kwh) = peak_usage_hour(&sample());
        assert_eq!(hour, 16);
        assert!((kwh - 4.06).abs() < 1e-9);
    }

    #[test]
    fn test_peak_hour_sums_within_hour() {
        let records = vec![
            record_at("A", 1.0, "13:05", "2023-01-01", "Winter"),
            record_at("B", 1.5, "13:54", "2023-01-01", "Winter"),
            record_at("C", 2.0, "09:00", "2023-01-01", "Winter"),
        ];
        let (hour, kwh) = peak_usage_hour(&records);
        assert_eq!(hour, 13);
        assert!((kwh - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_peak_hour_empty_sentinel() {
        assert_eq!(peak_usage_hour(&[]), (12, 0.0));
    }

    #[test]
    fn test_peak_hour_tie_goes_to_first_seen() {
        // Hour 20 appears before hour 6 in the scan; both sum to 2.0.
        let records = vec![
            record_at("A", 2.0, "20:00", "2023-01-01", "Winter"),
            record_at("B", 2.0, "06:00", "2023-01-01", "Winter"),
        ];
        let (hour, _) = peak_usage_hour(&records);
        assert_eq!(hour, 20);
    }

    #[test]
    fn test_peak_hour_skips_unparseable_times() {
        let records = vec![
            record_at("A", 5.0, "not a time", "2023-01-01", "Winter"),
            record_at("B", 1.0, "08:30", "2023-01-01", "Winter"),
        ];
        let (hour, kwh) = peak_usage_hour(&records);
        assert_eq!(hour, 8);
        assert!((kwh - 1.0).abs() < 1e-9);
        // The skipped record still counts toward every other aggregate.
        assert!((total_consumption(&records) - 6.0).abs() < 1e-9);
    }

    // ── monthly_consumption ──────────────────────────────────────────────────

    #[test]
    fn test_monthly_groups_by_month_key() {
        let records = vec![
            record_at("A", 4.06, "10:00", "2023-04-28", "Spring"),
            record_at("B", 1.88, "11:00", "2023-04-15", "Spring"),
            record_at("C", 1.87, "12:00", "2023-10-07", "Fall"),
        ];
        let months = monthly_consumption(&records);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, "4/2023");
        assert!((months[0].consumption - 5.94).abs() < 1e-9);
        assert_eq!(months[1].month, "10/2023");
    }

    #[test]
    fn test_monthly_rounds_to_two_places() {
        let records = vec![
            record_at("A", 1.111, "10:00", "2023-04-01", "Spring"),
            record_at("B", 2.222, "11:00", "2023-04-02", "Spring"),
        ];
        let months = monthly_consumption(&records);
        assert_eq!(months[0].consumption, 3.33);
    }

    #[test]
    fn test_monthly_first_appearance_order_not_chronological() {
        let records = vec![
            record_at("A", 1.0, "10:00", "2023-12-01", "Winter"),
            record_at("B", 1.0, "10:00", "2023-01-01", "Winter"),
        ];
        let months = monthly_consumption(&records);
        assert_eq!(months[0].month, "12/2023");
        assert_eq!(months[1].month, "1/2023");
    }

    #[test]
    fn test_monthly_empty() {
        assert!(monthly_consumption(&[]).is_empty());
    }

    // ── per_person_average ───────────────────────────────────────────────────

    #[test]
    fn test_per_person_average() {
        let avg = per_person_average(&sample(), 4);
        // Full precision internally; presentation rounds to 1.95.
        assert!((avg - 1.9525).abs() < 1e-9);
    }

    #[test]
    fn test_per_person_average_zero_size_guarded() {
        let avg = per_person_average(&sample(), 0);
        assert!((avg - 7.81).abs() < 1e-9);
    }

    // ── estimated_cost ───────────────────────────────────────────────────────

    #[test]
    fn test_estimated_cost_default_rate() {
        let cost = estimated_cost(&sample(), crate::models::DEFAULT_RATE_PER_KWH);
        assert!((cost - 1.1715).abs() < 1e-9);
    }

    #[test]
    fn test_estimated_cost_does_not_compound_rounding() {
        // Cost derives from the full-precision total, not a rounded one.
        let records = vec![record("A", 1.005), record("B", 1.005)];
        let cost = estimated_cost(&records, 1.0);
        assert!((cost - 2.01).abs() < 1e-9);
    }

    // ── purity ───────────────────────────────────────────────────────────────

    #[test]
    fn test_aggregates_are_idempotent() {
        let records = sample();
        assert_eq!(total_consumption(&records), total_consumption(&records));
        assert_eq!(
            consumption_by_appliance(&records),
            consumption_by_appliance(&records)
        );
        assert_eq!(peak_usage_hour(&records), peak_usage_hour(&records));
        assert_eq!(monthly_consumption(&records), monthly_consumption(&records));
    }
}
