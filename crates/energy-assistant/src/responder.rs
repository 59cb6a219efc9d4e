//! Data-backed answer rendering for the assistant.

use energy_core::analytics;
use energy_core::formatting::{format_number, hour_label};
use energy_core::models::EnergyRecord;

use crate::intent::Intent;

/// Canned prompts shown to the user as one-tap questions.
pub const SUGGESTED_QUESTIONS: &[&str] = &[
    "What's my total energy consumption?",
    "Which appliance uses the most energy?",
    "How does my usage vary by season?",
    "What are some energy saving tips?",
    "When is my peak usage time?",
    "How much does my energy cost?",
];

/// Renders answers for one signed-in home.
///
/// Holds the home's records and settings; every answer is recomputed from
/// the records at ask time.
#[derive(Debug, Clone)]
pub struct Responder {
    home_id: String,
    records: Vec<EnergyRecord>,
    household_size: u32,
    rate_per_kwh: f64,
}

impl Responder {
    pub fn new(
        home_id: String,
        records: Vec<EnergyRecord>,
        household_size: u32,
        rate_per_kwh: f64,
    ) -> Self {
        Self {
            home_id,
            records,
            household_size,
            rate_per_kwh,
        }
    }

    /// Opening message shown when the assistant view starts.
    pub fn greeting(&self) -> String {
        format!(
            "Hello! I'm your Energy Assistant for Home {}. I can analyze your \
             energy consumption patterns and provide personalized advice based \
             on your data.",
            self.home_id
        )
    }

    /// Answer a free-text question.
    ///
    /// Walks the matched intents in priority order; intents that decline
    /// (no consumption to report on) pass to the next match, and a question
    /// with no answerable intent gets the capability overview.
    pub fn answer(&self, message: &str) -> String {
        for intent in Intent::detect_all(message) {
            if let Some(response) = self.respond(intent) {
                return response;
            }
        }
        self.fallback()
    }

    /// Render one intent's answer; `None` when the intent declines.
    pub fn respond(&self, intent: Intent) -> Option<String> {
        match intent {
            Intent::Total => {
                let total = analytics::total_consumption(&self.records);
                let breakdown = analytics::consumption_by_appliance(&self.records)
                    .iter()
                    .map(|(appliance, kwh)| format!("{}: {} kWh", appliance, format_number(*kwh, 2)))
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!(
                    "Your total energy consumption is {} kWh.\n\nBreakdown by appliance: {}.",
                    format_number(total, 2),
                    breakdown
                ))
            }
            Intent::HighestAppliance => {
                let (appliance, kwh) = analytics::highest_consumption_appliance(&self.records);
                if kwh <= 0.0 {
                    return None;
                }
                Some(format!(
                    "Your {} uses the most energy at {} kWh.\n\nConsider using it \
                     during off-peak hours or upgrading to a more efficient model.",
                    appliance,
                    format_number(kwh, 2)
                ))
            }
            Intent::Seasonal => {
                let seasons = analytics::consumption_by_season(&self.records)
                    .iter()
                    .map(|(season, kwh)| format!("{}: {} kWh", season, format_number(*kwh, 2)))
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(format!("Your seasonal energy consumption:\n{}.", seasons))
            }
            Intent::PeakTime => {
                let (hour, kwh) = analytics::peak_usage_hour(&self.records);
                Some(format!(
                    "Your peak energy usage is around {} with {} kWh.\n\nConsider \
                     shifting some usage to off-peak hours (before 4 PM or after 9 PM).",
                    hour_label(hour),
                    format_number(kwh, 2)
                ))
            }
            Intent::Appliances => {
                let list = analytics::consumption_by_appliance(&self.records)
                    .iter()
                    .map(|(appliance, kwh)| {
                        format!("- {}: {} kWh", appliance, format_number(*kwh, 2))
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                Some(format!("Your appliances and their consumption:\n{}", list))
            }
            Intent::SavingTips => {
                let (appliance, kwh) = analytics::highest_consumption_appliance(&self.records);
                if kwh <= 0.0 {
                    return None;
                }
                Some(format!(
                    "Based on your usage, your {} consumes the most energy ({} kWh).\n\n\
                     {}\n\nUsing appliances during off-peak hours can reduce costs by 10-20%.",
                    appliance,
                    format_number(kwh, 2),
                    saving_tip(&appliance)
                ))
            }
            Intent::Cost => {
                let total = analytics::total_consumption(&self.records);
                let cost = analytics::estimated_cost(&self.records, self.rate_per_kwh);
                Some(format!(
                    "Based on your consumption of {} kWh, your estimated monthly cost \
                     is about ${} (at ${}/kWh).\n\nActual cost depends on your local \
                     utility rates.",
                    format_number(total, 2),
                    format_number(cost, 2),
                    format_number(self.rate_per_kwh, 2)
                ))
            }
            Intent::Comparison => {
                let total = analytics::total_consumption(&self.records);
                let avg = analytics::per_person_average(&self.records, self.household_size);
                Some(format!(
                    "Your household of {} uses {} kWh total, about {} kWh per person.\n\n\
                     The average person uses 200-300 kWh monthly.",
                    self.household_size.max(1),
                    format_number(total, 2),
                    format_number(avg, 2)
                ))
            }
            Intent::Fallback => Some(self.fallback()),
        }
    }

    fn fallback(&self) -> String {
        "I can analyze your energy consumption patterns, identify high-usage \
         appliances, provide seasonal insights, and offer personalized saving \
         tips.\n\nTry asking me about:\n- Your total consumption\n- Highest \
         energy appliance\n- Seasonal usage patterns\n- Energy saving tips\n\
         - Cost estimation"
            .to_string()
    }
}

/// A saving tip targeted at the named appliance, with a generic tip for
/// anything unrecognised. Lookup is case-insensitive.
fn saving_tip(appliance: &str) -> &'static str {
    match appliance.to_lowercase().as_str() {
        "heater" => {
            "Consider setting your thermostat 1-2 degrees lower in winter to \
             save 5-10% on heating costs."
        }
        "air conditioning" => {
            "Set your thermostat 1-2 degrees higher in summer and use fans to \
             circulate air."
        }
        "oven" => {
            "Use microwave or toaster oven for small meals instead of the full \
             oven to save energy."
        }
        "lights" => "Switch to LED bulbs which use 75% less energy than incandescent bulbs.",
        "fridge" => {
            "Ensure your refrigerator door seals are tight and avoid opening \
             frequently."
        }
        _ => "Turn off appliances when not in use and use power strips to eliminate phantom load.",
    }
}
