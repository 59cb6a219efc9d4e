//! Built-in sample dataset used when no data file can be found.
//!
//! Small but shaped exactly like a real export, so every downstream path
//! (login, aggregation, assistant) behaves the same against it.

use energy_core::models::EnergyRecord;

use crate::loader::flatten_document;

/// The raw sample document in the exported nested shape.
pub fn sample_document() -> serde_json::Value {
    serde_json::json!([
        {
            "HomeID": 112,
            "HouseholdSize": 1,
            "Records": [
                {
                    "ApplianceType": "Dishwasher",
                    "EnergyConsumption(kWh)": 4.06,
                    "Time": "16:10",
                    "Date": "2023-04-28",
                    "OutdoorTemperature(°C)": 21.6,
                    "Season": "Summer"
                }
            ]
        },
        {
            "HomeID": 346,
            "HouseholdSize": 4,
            "Records": [
                {
                    "ApplianceType": "Computer",
                    "EnergyConsumption(kWh)": 1.88,
                    "Time": "13:54",
                    "Date": "2023-12-16",
                    "OutdoorTemperature(°C)": 19.8,
                    "Season": "Fall"
                }
            ]
        },
        {
            "HomeID": 18,
            "HouseholdSize": 3,
            "Records": [
                {
                    "ApplianceType": "Computer",
                    "EnergyConsumption(kWh)": 1.87,
                    "Time": "13:59",
                    "Date": "2023-10-07",
                    "OutdoorTemperature(°C)": 8.8,
                    "Season": "Winter"
                }
            ]
        }
    ])
}

/// The sample document flattened through the regular loading path.
pub fn sample_records() -> Vec<EnergyRecord> {
    flatten_document(&sample_document())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_covers_three_homes() {
        let records = sample_records();
        assert_eq!(records.len(), 3);
        let homes: Vec<&str> = records.iter().map(|r| r.home_id.as_str()).collect();
        assert_eq!(homes, vec!["112", "346", "18"]);
    }

    #[test]
    fn test_sample_flattens_home_fields() {
        let records = sample_records();
        assert_eq!(records[0].appliance, "Dishwasher");
        assert!((records[0].energy_kwh - 4.06).abs() < 1e-9);
        assert_eq!(records[0].household_size, 1);
        assert_eq!(records[1].household_size, 4);
        assert_eq!(records[2].season, "Winter");
    }

    #[test]
    fn test_sample_outdoor_temperatures() {
        let records = sample_records();
        assert!((records[0].outdoor_temp_c - 21.6).abs() < 1e-9);
        assert!((records[1].outdoor_temp_c - 19.8).abs() < 1e-9);
        assert!((records[2].outdoor_temp_c - 8.8).abs() < 1e-9);
    }
}
