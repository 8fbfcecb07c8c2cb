//! Display normalisation for the biomarker bar chart.

use serde::{Deserialize, Serialize};

/// Percentage of a declared maximum: `(value / declared_max) * 100`.
/// Not clamped; readings above the declared maximum exceed 100%.
pub fn normalize_for_display(value: f64, declared_max: f64) -> f64 {
    (value / declared_max) * 100.0
}

/// Mean of the display percentages as a fraction (may exceed 1.0).
pub fn mean_threat_index(percentages: &[f64]) -> f64 {
    if percentages.is_empty() {
        return 0.0;
    }
    let mean = percentages.iter().sum::<f64>() / percentages.len() as f64;
    mean / 100.0
}

/// Colour band for one bar. Thresholds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Normal,
    Watch,
    Elevated,
    Severe,
    Critical,
}

impl SeverityBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            SeverityBand::Critical
        } else if percentage >= 80.0 {
            SeverityBand::Severe
        } else if percentage >= 70.0 {
            SeverityBand::Elevated
        } else if percentage >= 60.0 {
            SeverityBand::Watch
        } else {
            SeverityBand::Normal
        }
    }

    pub fn colour(self) -> &'static str {
        match self {
            SeverityBand::Critical => "red",
            SeverityBand::Severe => "orangered",
            SeverityBand::Elevated => "darkorange",
            SeverityBand::Watch => "orange",
            SeverityBand::Normal => "gray",
        }
    }
}
