//! Traits for the external model seam.
//!
//! The trained classifier and its feature scaler live outside this crate.
//! These traits let the scan pipeline call them without knowing how they
//! were built; artifacts are loaded from operator-supplied JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use beacon_common::{BeaconError, Result};

use crate::features::{FeatureVector, ModelFamily};

/// Binary label emitted by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    High,
    Low,
}

impl RiskLabel {
    pub fn message(self) -> &'static str {
        match self {
            RiskLabel::High => "High risk detected.",
            RiskLabel::Low => "No high risk detected.",
        }
    }

    /// Verdict wording for the model family that produced the label.
    /// The Pima model is a diabetes classifier and says so.
    pub fn message_for(self, family: ModelFamily) -> &'static str {
        match (family, self) {
            (ModelFamily::Clinical, _) => self.message(),
            (ModelFamily::Pima, RiskLabel::High) => "High diabetes risk detected.",
            (ModelFamily::Pima, RiskLabel::Low) => "No high diabetes risk detected.",
        }
    }

    /// Label from a probability-like value: high at or above `threshold`.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability >= threshold {
            RiskLabel::High
        } else {
            RiskLabel::Low
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLabel::High => write!(f, "HIGH"),
            RiskLabel::Low => write!(f, "LOW"),
        }
    }
}

/// Classifier output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: RiskLabel,
    /// Present when the model exposes one
    pub probability: Option<f64>,
}

/// Feature-scaling transform applied before classification.
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector>;
}

/// Trait for the trained risk classifier.
///
/// Implementations can use:
/// - A JSON artifact exported from the training pipeline
/// - A remote inference service
/// - Mock data (testing)
pub trait RiskClassifier: Send + Sync {
    /// Model family whose vector layout this classifier expects.
    fn family(&self) -> ModelFamily;

    fn predict(&self, features: &FeatureVector) -> Result<Prediction>;
}

fn check_layout(expected: ModelFamily, dimension: usize, features: &FeatureVector) -> Result<()> {
    if features.family != expected || features.len() != dimension {
        return Err(BeaconError::Model(format!(
            "expected {} {:?} features, got {} {:?}",
            dimension,
            expected,
            features.len(),
            features.family
        )));
    }
    Ok(())
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

// ── Scalers ──────────────────────────────────────────────────────────────────

/// Passes features through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl FeatureScaler for IdentityScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        Ok(features.clone())
    }
}

/// Standardisation with externally fitted parameters: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub family: ModelFamily,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(family: ModelFamily, mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        let scaler = Self { family, mean, scale };
        scaler.validate()?;
        Ok(scaler)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let scaler: Self = read_artifact(path.as_ref())?;
        scaler.validate()?;
        Ok(scaler)
    }

    fn validate(&self) -> Result<()> {
        let dim = self.family.dimension();
        if self.mean.len() != dim || self.scale.len() != dim {
            return Err(BeaconError::Model(format!(
                "scaler for {:?} needs {dim} means and scales, got {} and {}",
                self.family,
                self.mean.len(),
                self.scale.len()
            )));
        }
        if self.scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(BeaconError::Model("scaler has a zero or non-finite scale".to_string()));
        }
        Ok(())
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        check_layout(self.family, self.mean.len(), features)?;
        let values = features
            .values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect();
        Ok(FeatureVector { family: features.family, values })
    }
}

// ── Classifiers ──────────────────────────────────────────────────────────────

/// Linear model with a logistic link, parameters from a training export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticClassifier {
    pub family: ModelFamily,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 { 0.5 }

impl LogisticClassifier {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let model: Self = read_artifact(path.as_ref())?;
        model.validate()?;
        Ok(model)
    }

    /// Coefficient count must match the family; every parameter must be
    /// finite and the threshold must sit in [0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.coefficients.len() != self.family.dimension() {
            return Err(BeaconError::Model(format!(
                "classifier for {:?} needs {} coefficients, got {}",
                self.family,
                self.family.dimension(),
                self.coefficients.len()
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(BeaconError::Model(format!(
                "classifier threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(BeaconError::Model("classifier parameters must be finite".to_string()));
        }
        Ok(())
    }
}

impl RiskClassifier for LogisticClassifier {
    fn family(&self) -> ModelFamily {
        self.family
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        check_layout(self.family, self.coefficients.len(), features)?;
        let z: f64 = self.intercept
            + features
                .values
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();
        let probability = 1.0 / (1.0 + (-z).exp());
        debug!(z, probability, "logistic classifier evaluated");
        Ok(Prediction {
            label: RiskLabel::from_probability(probability, self.threshold),
            probability: Some(probability),
        })
    }
}

// ── Mock Implementation for Testing ────────────────────────────────────────

/// Returns a fixed label and records nothing.
pub struct MockClassifier {
    family: ModelFamily,
    label: RiskLabel,
}

impl MockClassifier {
    pub fn new(family: ModelFamily, label: RiskLabel) -> Self {
        Self { family, label }
    }
}

impl RiskClassifier for MockClassifier {
    fn family(&self) -> ModelFamily {
        self.family
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        check_layout(self.family, self.family.dimension(), features)?;
        Ok(Prediction { label: self.label, probability: None })
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
