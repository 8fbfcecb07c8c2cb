//! Bar chart built against the declared maxima, one set per display profile.
//! The maxima themselves live in `ScoringConfig.maxima`.

use serde::{Deserialize, Serialize};

use beacon_common::scoring_config::{ClinicalMaxima, DisplayMaxima, PimaMaxima};
use beacon_common::{DisplayProfile, GatedReading, Result};

use crate::normalise::{normalize_for_display, SeverityBand};

/// One bar of the biomarker breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBar {
    pub label: String,
    pub value: f64,
    pub declared_max: f64,
    pub percentage: f64,
    pub band: SeverityBand,
}

impl FeatureBar {
    fn new(label: &str, value: f64, declared_max: f64) -> Self {
        let percentage = normalize_for_display(value, declared_max);
        Self {
            label: label.to_string(),
            value,
            declared_max,
            percentage,
            band: SeverityBand::from_percentage(percentage),
        }
    }
}

pub fn clinical_bars(maxima: &ClinicalMaxima, reading: &GatedReading<'_>) -> Vec<FeatureBar> {
    vec![
        FeatureBar::new("Age", reading.age(), maxima.age),
        FeatureBar::new("BMI", reading.bmi(), maxima.bmi),
        FeatureBar::new("Glucose", reading.glucose(), maxima.glucose),
        FeatureBar::new("HbA1c", reading.hba1c(), maxima.hba1c),
    ]
}

/// Fails when the reading carries no Pima markers.
pub fn pima_bars(maxima: &PimaMaxima, reading: &GatedReading<'_>) -> Result<Vec<FeatureBar>> {
    let pima = reading.pima()?;
    Ok(vec![
        FeatureBar::new("Age", reading.age(), maxima.age),
        FeatureBar::new("Pregnancies", pima.pregnancies, maxima.pregnancies),
        FeatureBar::new("Glucose", reading.glucose(), maxima.glucose),
        FeatureBar::new("BP", pima.blood_pressure, maxima.blood_pressure),
        FeatureBar::new("Skin", pima.skin_thickness, maxima.skin_thickness),
        FeatureBar::new("Insulin", pima.insulin, maxima.insulin),
        FeatureBar::new("DPF", pima.diabetes_pedigree_function, maxima.diabetes_pedigree_function),
        FeatureBar::new("BMI", reading.bmi(), maxima.bmi),
    ])
}

/// Bars for the given profile against the configured maxima.
pub fn display_bars(
    profile: DisplayProfile,
    maxima: &DisplayMaxima,
    reading: &GatedReading<'_>,
) -> Result<Vec<FeatureBar>> {
    match profile {
        DisplayProfile::Clinical => Ok(clinical_bars(&maxima.clinical, reading)),
        DisplayProfile::Pima => pima_bars(&maxima.pima, reading),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beacon_common::{BeaconError, BiomarkerReading, PimaMarkers};

    fn defaults() -> DisplayMaxima {
        DisplayMaxima::default()
    }

    #[test]
    fn test_clinical_bars_order_and_values() {
        let reading = BiomarkerReading::new(40.0, 150.0, 4.5, Some(20.0));
        let bars = display_bars(DisplayProfile::Clinical, &defaults(), &reading.gate().unwrap()).unwrap();
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Age", "BMI", "Glucose", "HbA1c"]);
        assert_eq!(bars[0].percentage, 50.0);
        assert_eq!(bars[1].percentage, 50.0);
        assert_eq!(bars[2].percentage, 50.0);
        assert_eq!(bars[3].percentage, 50.0);
    }

    #[test]
    fn test_profiles_disagree_on_bmi() {
        let reading = BiomarkerReading::new(40.0, 100.0, 5.0, Some(30.0))
            .with_pima(PimaMarkers::default());
        let gated = reading.gate().unwrap();
        let clinical = display_bars(DisplayProfile::Clinical, &defaults(), &gated).unwrap();
        let pima = display_bars(DisplayProfile::Pima, &defaults(), &gated).unwrap();
        assert_eq!(clinical[1].percentage, 75.0);
        assert_eq!(pima.len(), 8);
        assert_eq!(pima[7].label, "BMI");
        assert_eq!(pima[7].percentage, 50.0);
        assert_eq!(pima[2].percentage, 50.0);
    }

    #[test]
    fn test_pima_profile_needs_markers() {
        let reading = BiomarkerReading::new(40.0, 100.0, 5.0, Some(30.0));
        let err = display_bars(DisplayProfile::Pima, &defaults(), &reading.gate().unwrap()).unwrap_err();
        assert!(matches!(err, BeaconError::MissingField(_)));
    }

    #[test]
    fn test_bar_exceeding_max_is_critical() {
        let reading = BiomarkerReading::new(40.0, 100.0, 5.0, Some(45.0));
        let bars = display_bars(DisplayProfile::Clinical, &defaults(), &reading.gate().unwrap()).unwrap();
        assert_eq!(bars[1].percentage, 112.5);
        assert_eq!(bars[1].band, SeverityBand::Critical);
    }

    #[test]
    fn test_configured_maximum_overrides_default() {
        let mut maxima = DisplayMaxima::default();
        maxima.clinical.bmi = 50.0;
        let reading = BiomarkerReading::new(40.0, 100.0, 5.0, Some(25.0));
        let bars = display_bars(DisplayProfile::Clinical, &maxima, &reading.gate().unwrap()).unwrap();
        assert_eq!(bars[1].declared_max, 50.0);
        assert_eq!(bars[1].percentage, 50.0);
        assert_eq!(bars[0].declared_max, 80.0);
    }
}
