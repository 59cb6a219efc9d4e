//! Keyword classification of assistant questions.

/// What a question is asking for.
///
/// Variants are listed in match priority: a question containing keywords
/// from several intents is answered by the first one in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Total consumption with a per-appliance breakdown.
    Total,
    /// The single appliance with the highest summed consumption.
    HighestAppliance,
    /// Consumption grouped by season.
    Seasonal,
    /// The peak usage hour.
    PeakTime,
    /// Full per-appliance listing.
    Appliances,
    /// A saving tip targeted at the top appliance.
    SavingTips,
    /// Estimated cost at the configured rate.
    Cost,
    /// Per-person usage for the household.
    Comparison,
    /// None of the above; answered with the capability overview.
    Fallback,
}

impl Intent {
    /// Keyword substrings that trigger this intent. Matching is
    /// case-insensitive over the whole message.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Intent::Total => &["total", "how much", "consumption"],
            Intent::HighestAppliance => &["highest", "most energy", "top appliance"],
            Intent::Seasonal => &["season", "winter", "summer"],
            Intent::PeakTime => &["time", "peak", "when"],
            Intent::Appliances => &["appliance", "device"],
            Intent::SavingTips => &["reduce", "save", "tip"],
            Intent::Cost => &["bill", "cost", "money"],
            Intent::Comparison => &["compare", "average"],
            Intent::Fallback => &[],
        }
    }

    /// All non-fallback intents in priority order.
    const PRIORITY: [Intent; 8] = [
        Intent::Total,
        Intent::HighestAppliance,
        Intent::Seasonal,
        Intent::PeakTime,
        Intent::Appliances,
        Intent::SavingTips,
        Intent::Cost,
        Intent::Comparison,
    ];

    /// Every intent whose keywords appear in `message`, in priority order.
    ///
    /// Some intents decline to answer when the home has no consumption, so
    /// the responder walks this list rather than stopping at the first hit.
    pub fn detect_all(message: &str) -> Vec<Intent> {
        let lower = message.to_lowercase();
        Intent::PRIORITY
            .iter()
            .copied()
            .filter(|intent| intent.keywords().iter().any(|kw| lower.contains(kw)))
            .collect()
    }

    /// The highest-priority match, or [`Intent::Fallback`] when nothing hits.
    pub fn detect(message: &str) -> Intent {
        Intent::detect_all(message)
            .first()
            .copied()
            .unwrap_or(Intent::Fallback)
    }
}
