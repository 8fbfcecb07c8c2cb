//! Form layer: turns raw text fields into a well-typed reading.
//!
//! Unparsable text falls back to the field default, numbers are rounded to
//! two decimals, and clinical inputs are clamped to the configured ranges.
//! The scorer never sees malformed input.

use tracing::debug;

use beacon_common::bmi::round2;
use beacon_common::{compute_bmi, BiomarkerReading, DisplayProfile, Gender, PimaMarkers, Result, ScoringConfig};

pub const DEFAULT_AGE: f64 = 30.0;
pub const DEFAULT_GLUCOSE: f64 = 100.0;
pub const DEFAULT_HBA1C: f64 = 5.5;
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;

/// Raw values as typed by the user. `None` means the field was left alone.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub age: Option<String>,
    pub glucose: Option<String>,
    pub hba1c: Option<String>,
    pub gender: Option<String>,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub weight_kg: Option<String>,
    pub height_cm: Option<String>,
    pub bmi: Option<String>,
    pub pregnancies: Option<String>,
    pub blood_pressure: Option<String>,
    pub skin_thickness: Option<String>,
    pub insulin: Option<String>,
    pub dpf: Option<String>,
}

/// Parse `raw`, substituting `default` when absent or malformed.
pub fn parse_or(raw: Option<&str>, default: f64) -> f64 {
    match raw.map(str::trim) {
        Some(text) => match text.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                debug!(input = text, default, "unparsable field, using default");
                default
            }
        },
        None => default,
    }
}

/// Integer-only fields keep the whole part.
pub fn parse_whole_or(raw: Option<&str>, default: f64) -> f64 {
    parse_or(raw, default).trunc()
}

impl FormInput {
    /// BMI from the calculator section. Computed only when the user filled
    /// in weight or height (or gave a BMI directly); otherwise `None`, which
    /// keeps the scan locked.
    pub fn resolve_bmi(&self, config: &ScoringConfig) -> Result<Option<f64>> {
        if let Some(raw) = self.bmi.as_deref() {
            let bmi = parse_or(Some(raw), f64::NAN);
            if bmi.is_finite() && bmi > 0.0 {
                return Ok(Some(round2(bmi)));
            }
            debug!(input = raw, "ignoring unusable BMI value");
        }
        if self.weight_kg.is_none() && self.height_cm.is_none() {
            return Ok(None);
        }
        let ranges = &config.ranges;
        let weight = ranges.weight_kg.clamp(parse_or(self.weight_kg.as_deref(), DEFAULT_WEIGHT_KG));
        let height = ranges.height_cm.clamp(parse_or(self.height_cm.as_deref(), DEFAULT_HEIGHT_CM));
        compute_bmi(weight, height).map(Some)
    }

    /// Build the reading for the configured profile.
    pub fn into_reading(&self, config: &ScoringConfig) -> Result<BiomarkerReading> {
        let ranges = &config.ranges;
        let gender = match self.gender.as_deref() {
            Some(text) => text.parse::<Gender>()?,
            None => Gender::default(),
        };

        let mut reading = match config.profile {
            DisplayProfile::Clinical => BiomarkerReading::new(
                round2(ranges.age.clamp(parse_or(self.age.as_deref(), DEFAULT_AGE))),
                round2(ranges.glucose.clamp(parse_or(self.glucose.as_deref(), DEFAULT_GLUCOSE))),
                round2(ranges.hba1c.clamp(parse_or(self.hba1c.as_deref(), DEFAULT_HBA1C))),
                None,
            ),
            DisplayProfile::Pima => {
                let defaults = PimaMarkers::default();
                let markers = PimaMarkers {
                    pregnancies: parse_whole_or(self.pregnancies.as_deref(), defaults.pregnancies),
                    blood_pressure: round2(parse_or(self.blood_pressure.as_deref(), defaults.blood_pressure)),
                    skin_thickness: round2(parse_or(self.skin_thickness.as_deref(), defaults.skin_thickness)),
                    insulin: round2(parse_or(self.insulin.as_deref(), defaults.insulin)),
                    diabetes_pedigree_function: round2(parse_or(
                        self.dpf.as_deref(),
                        defaults.diabetes_pedigree_function,
                    )),
                };
                BiomarkerReading::new(
                    parse_whole_or(self.age.as_deref(), DEFAULT_AGE),
                    round2(parse_or(self.glucose.as_deref(), DEFAULT_GLUCOSE)),
                    round2(ranges.hba1c.clamp(parse_or(self.hba1c.as_deref(), DEFAULT_HBA1C))),
                    None,
                )
                .with_pima(markers)
            }
        };

        reading = reading
            .with_gender(gender)
            .with_history(self.hypertension, self.heart_disease);
        reading.bmi = self.resolve_bmi(config)?;
        Ok(reading)
    }
}
