//! beacon-cli — Terminal front end for the BloodBeacon risk scanner.
//!
//! Run with: cargo run -p beacon-cli -- scan --age 52 --glucose 180 --weight 82 --height 170

pub mod config;
pub mod form;
pub mod report;

use anyhow::Context;
use tracing::info;

use beacon_common::ScoringConfig;
use beacon_scorer::classifier::{FeatureScaler, IdentityScaler, LogisticClassifier, RiskClassifier, StandardScaler};

/// Scaler and classifier built from the configured artifacts.
pub struct ModelStack {
    pub scaler: Box<dyn FeatureScaler>,
    pub classifier: Option<Box<dyn RiskClassifier>>,
}

impl ModelStack {
    pub fn load(config: &ScoringConfig) -> anyhow::Result<Self> {
        let scaler: Box<dyn FeatureScaler> = match &config.model.scaler_path {
            Some(path) => Box::new(
                StandardScaler::from_json_file(path)
                    .with_context(|| format!("loading scaler artifact {path}"))?,
            ),
            None => Box::new(IdentityScaler),
        };

        let classifier: Option<Box<dyn RiskClassifier>> = match &config.model.classifier_path {
            Some(path) => {
                let model = LogisticClassifier::from_json_file(path)
                    .with_context(|| format!("loading classifier artifact {path}"))?;
                info!("Classifier loaded from {path} ({:?} family)", model.family);
                Some(Box::new(model) as Box<dyn RiskClassifier>)
            }
            None => {
                info!(
                    "No classifier artifact configured; labelling by composite cutoff {}",
                    config.classifier_cutoff
                );
                None
            }
        };

        Ok(Self { scaler, classifier })
    }
}
