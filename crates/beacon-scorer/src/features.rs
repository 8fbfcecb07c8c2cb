//! Fixed-order feature vectors handed to the external classifier.
//!
//! Order is a positional contract with the trained model:
//! - clinical: gender, age, hypertension, heart_disease, bmi, hba1c, glucose
//! - pima:     pregnancies, glucose, bp, skin, insulin, bmi, dpf, age

use serde::{Deserialize, Serialize};

use beacon_common::{DisplayProfile, GatedReading, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Clinical,
    Pima,
}

impl ModelFamily {
    pub fn feature_names(self) -> &'static [&'static str] {
        match self {
            ModelFamily::Clinical => &[
                "gender", "age", "hypertension", "heart_disease", "bmi", "hba1c", "glucose",
            ],
            ModelFamily::Pima => &[
                "pregnancies", "glucose", "blood_pressure", "skin_thickness",
                "insulin", "bmi", "diabetes_pedigree_function", "age",
            ],
        }
    }

    pub fn dimension(self) -> usize {
        self.feature_names().len()
    }
}

impl From<DisplayProfile> for ModelFamily {
    fn from(profile: DisplayProfile) -> Self {
        match profile {
            DisplayProfile::Clinical => ModelFamily::Clinical,
            DisplayProfile::Pima => ModelFamily::Pima,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub family: ModelFamily,
    pub values: Vec<f64>,
}

impl FeatureVector {
    /// Build the vector for `family`. The BMI gate is already satisfied by
    /// the type; Pima vectors additionally need the Pima markers.
    pub fn assemble(family: ModelFamily, reading: &GatedReading<'_>) -> Result<Self> {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        let values = match family {
            ModelFamily::Clinical => vec![
                reading.gender().encoded(),
                reading.age(),
                flag(reading.hypertension()),
                flag(reading.heart_disease()),
                reading.bmi(),
                reading.hba1c(),
                reading.glucose(),
            ],
            ModelFamily::Pima => {
                let pima = reading.pima()?;
                vec![
                    pima.pregnancies,
                    reading.glucose(),
                    pima.blood_pressure,
                    pima.skin_thickness,
                    pima.insulin,
                    reading.bmi(),
                    pima.diabetes_pedigree_function,
                    reading.age(),
                ]
            }
        };
        Ok(Self { family, values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
