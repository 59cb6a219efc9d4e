use serde::{Deserialize, Serialize};

/// Default electricity rate in USD per kilowatt-hour, used for cost
/// estimates when the caller does not override it.
pub const DEFAULT_RATE_PER_KWH: f64 = 0.15;

/// Sentinel appliance label returned by the engine for empty inputs.
pub const NO_DATA: &str = "No data";

/// Hour reported by the peak-usage aggregate when there are no records.
pub const DEFAULT_PEAK_HOUR: u32 = 12;

/// A single appliance energy-usage observation for one household.
///
/// Records are produced once by the loader, held as an immutable in-memory
/// collection for the session, and only ever read by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyRecord {
    /// Opaque household identifier. Equality-compared, never arithmetic.
    pub home_id: String,
    /// Categorical appliance label, e.g. "Dishwasher". Open set.
    pub appliance: String,
    /// Energy consumed, in kilowatt-hours. Non-negative; malformed source
    /// values were coerced to 0.0 at the ingestion boundary.
    #[serde(default)]
    pub energy_kwh: f64,
    /// Local time-of-day in `HH:MM` 24-hour form.
    pub time: String,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    /// Outdoor temperature in degrees Celsius. May be negative.
    #[serde(default)]
    pub outdoor_temp_c: f64,
    /// Season label (nominally Spring/Summer/Fall/Winter). Treated as an
    /// opaque grouping key.
    pub season: String,
    /// Number of people in the household. Constant per `home_id`, ≥ 1.
    #[serde(default = "default_household_size")]
    pub household_size: u32,
}

fn default_household_size() -> u32 {
    1
}

/// One entry of the monthly consumption rollup.
///
/// `month` has the form `"M/YYYY"` (1-based month, not zero-padded) and
/// `consumption` is rounded to 2 decimal places, ready for the chart feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub month: String,
    pub consumption: f64,
}

impl EnergyRecord {
    /// Hour of day parsed from the `time` field, when parseable.
    pub fn hour(&self) -> Option<u32> {
        crate::parse::parse_hour(&self.time)
    }

    /// The `"M/YYYY"` grouping key for this record's date, when parseable.
    pub fn month_key(&self) -> Option<String> {
        crate::parse::month_key(&self.date)
    }
}
