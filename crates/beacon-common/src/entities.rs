//! Patient-side entity types consumed by the scorer.
//! Every value here lives for one evaluation only; nothing is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{BeaconError, Result};

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Encoding expected by the clinical model family: Male = 1, Female = 0.
    pub fn encoded(self) -> f64 {
        match self {
            Gender::Male => 1.0,
            Gender::Female => 0.0,
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(BeaconError::InvalidMeasurement(format!("unknown gender '{other}'"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Pima markers (alternate model family)
// ---------------------------------------------------------------------------

/// Extra markers used by the 8-feature model family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PimaMarkers {
    pub pregnancies: f64,
    pub blood_pressure: f64,      // mmHg
    pub skin_thickness: f64,      // triceps fold, mm
    pub insulin: f64,             // µU/mL
    pub diabetes_pedigree_function: f64,
}

impl Default for PimaMarkers {
    fn default() -> Self {
        Self {
            pregnancies: 0.0,
            blood_pressure: 70.0,
            skin_thickness: 20.0,
            insulin: 79.0,
            diabetes_pedigree_function: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Biomarker reading
// ---------------------------------------------------------------------------

/// One patient's inputs as handed over by the form layer.
///
/// `bmi` stays `None` until the BMI calculator has run; a reading in that
/// state cannot be scored (see [`BiomarkerReading::gate`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerReading {
    pub age: f64,
    pub glucose: f64,            // mg/dL
    pub hba1c: f64,              // %
    pub bmi: Option<f64>,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub hypertension: bool,
    #[serde(default)]
    pub heart_disease: bool,
    #[serde(default)]
    pub pima: Option<PimaMarkers>,
}

impl Default for BiomarkerReading {
    /// Form defaults before the user has touched anything.
    fn default() -> Self {
        Self {
            age: 30.0,
            glucose: 100.0,
            hba1c: 5.5,
            bmi: None,
            gender: Gender::Male,
            hypertension: false,
            heart_disease: false,
            pima: None,
        }
    }
}

impl BiomarkerReading {
    pub fn new(age: f64, glucose: f64, hba1c: f64, bmi: Option<f64>) -> Self {
        Self { age, glucose, hba1c, bmi, ..Default::default() }
    }

    pub fn with_bmi(mut self, bmi: f64) -> Self {
        self.bmi = Some(bmi);
        self
    }

    pub fn with_history(mut self, hypertension: bool, heart_disease: bool) -> Self {
        self.hypertension = hypertension;
        self.heart_disease = heart_disease;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_pima(mut self, markers: PimaMarkers) -> Self {
        self.pima = Some(markers);
        self
    }

    /// Validation interlock: only a reading with a computed BMI may be scored.
    pub fn gate(&self) -> Result<GatedReading<'_>> {
        match self.bmi {
            Some(bmi) => Ok(GatedReading { reading: self, bmi }),
            None => Err(BeaconError::BmiMissing),
        }
    }

    pub fn is_scan_ready(&self) -> bool {
        self.bmi.is_some()
    }
}

/// A reading that has passed the BMI interlock.
#[derive(Debug, Clone, Copy)]
pub struct GatedReading<'a> {
    reading: &'a BiomarkerReading,
    bmi: f64,
}

impl<'a> GatedReading<'a> {
    pub fn reading(&self) -> &'a BiomarkerReading {
        self.reading
    }

    pub fn age(&self) -> f64 { self.reading.age }
    pub fn glucose(&self) -> f64 { self.reading.glucose }
    pub fn hba1c(&self) -> f64 { self.reading.hba1c }
    pub fn bmi(&self) -> f64 { self.bmi }
    pub fn hypertension(&self) -> bool { self.reading.hypertension }
    pub fn heart_disease(&self) -> bool { self.reading.heart_disease }
    pub fn gender(&self) -> Gender { self.reading.gender }

    pub fn pima(&self) -> Result<&'a PimaMarkers> {
        self.reading
            .pima
            .as_ref()
            .ok_or_else(|| BeaconError::MissingField("pima markers".to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
