//! Risk evaluation: composite fraction, display bars, and the full scan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use beacon_common::{BiomarkerReading, GatedReading, Result, ScoringConfig, ScoringStrategy};

use crate::additive;
use crate::classifier::{FeatureScaler, Prediction, RiskClassifier, RiskLabel};
use crate::features::{FeatureVector, ModelFamily};
use crate::findrisc::{findrisc_score, FindriscInputs};
use crate::normalise::mean_threat_index;
use crate::profiles::{display_bars, FeatureBar};

/// Output of one evaluation. Recomputed every time, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub strategy: ScoringStrategy,
    /// Progress-indicator value in [0, 1]
    pub composite_score: f64,
    /// Strategy output before the [0, 1] clamp; only the mean-percentage
    /// index can exceed 1.0
    pub raw_index: f64,
    pub bars: Vec<FeatureBar>,
}

impl RiskResult {
    /// Label → percentage, in bar order.
    pub fn per_feature_percentages(&self) -> Vec<(&str, f64)> {
        self.bars.iter().map(|b| (b.label.as_str(), b.percentage)).collect()
    }

    /// Threat index as shown to the user, in percent.
    pub fn threat_index_percent(&self) -> f64 {
        self.composite_score * 100.0
    }
}

/// Composite index for `strategy` before clamping.
pub fn strategy_index(strategy: ScoringStrategy, reading: &GatedReading<'_>, bars: &[FeatureBar]) -> f64 {
    match strategy {
        ScoringStrategy::Additive => {
            additive::score(reading.age(), reading.glucose(), reading.hba1c(), reading.bmi())
        }
        ScoringStrategy::Findrisc => findrisc_score(&FindriscInputs {
            age: reading.age(),
            bmi: reading.bmi(),
            hypertension: reading.hypertension(),
            heart_disease: reading.heart_disease(),
            glucose: reading.glucose(),
            hba1c: reading.hba1c(),
        }),
        ScoringStrategy::MeanPercentage => {
            let percentages: Vec<f64> = bars.iter().map(|b| b.percentage).collect();
            mean_threat_index(&percentages)
        }
    }
}

/// Gate on BMI, build the display bars, and compute the composite.
pub fn evaluate(reading: &BiomarkerReading, config: &ScoringConfig) -> Result<RiskResult> {
    let gated = reading.gate().inspect_err(|_| {
        warn!("Scan lock: BMI not computed, evaluation refused");
    })?;

    let bars = display_bars(config.profile, &config.maxima, &gated)?;
    let raw_index = strategy_index(config.strategy, &gated, &bars);
    let composite_score = raw_index.clamp(0.0, 1.0);

    debug!(
        strategy = %config.strategy,
        profile = %config.profile,
        raw_index,
        composite_score,
        "risk evaluated"
    );

    Ok(RiskResult { strategy: config.strategy, composite_score, raw_index, bars })
}

/// Where the label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    Model,
    CompositeCutoff,
}

/// Everything a scan produces for the display layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scanned_at: DateTime<Utc>,
    pub reading: BiomarkerReading,
    pub risk: RiskResult,
    pub features: FeatureVector,
    pub prediction: Prediction,
    pub label_source: LabelSource,
}

/// Full scan: evaluate, assemble the model vector, scale, classify.
///
/// Without a classifier the label falls back to comparing the composite
/// against `config.classifier_cutoff`.
pub fn scan(
    reading: &BiomarkerReading,
    config: &ScoringConfig,
    scaler: &dyn FeatureScaler,
    classifier: Option<&dyn RiskClassifier>,
) -> Result<ScanReport> {
    let risk = evaluate(reading, config)?;
    let gated = reading.gate()?;

    let family = classifier.map_or_else(|| ModelFamily::from(config.profile), |c| c.family());
    let features = FeatureVector::assemble(family, &gated)?;

    let (prediction, label_source) = match classifier {
        Some(model) => {
            let scaled = scaler.transform(&features)?;
            (model.predict(&scaled)?, LabelSource::Model)
        }
        None => (
            Prediction {
                label: RiskLabel::from_probability(risk.composite_score, config.classifier_cutoff),
                probability: None,
            },
            LabelSource::CompositeCutoff,
        ),
    };

    info!(
        label = %prediction.label,
        threat_index = risk.composite_score,
        source = ?label_source,
        "scan complete"
    );

    Ok(ScanReport {
        scanned_at: Utc::now(),
        reading: reading.clone(),
        risk,
        features,
        prediction,
        label_source,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{IdentityScaler, MockClassifier};
    use beacon_common::{BeaconError, DisplayProfile, PimaMarkers};

    fn config(strategy: ScoringStrategy, profile: DisplayProfile) -> ScoringConfig {
        ScoringConfig { strategy, profile, ..Default::default() }
    }

    #[test]
    fn test_evaluate_refuses_without_bmi() {
        let reading = BiomarkerReading::new(61.0, 201.0, 6.6, None);
        let err = evaluate(&reading, &ScoringConfig::default()).unwrap_err();
        assert!(matches!(err, BeaconError::BmiMissing));
    }

    #[test]
    fn test_additive_strategy_matches_score() {
        let reading = BiomarkerReading::new(46.0, 100.0, 5.0, Some(22.0));
        let result = evaluate(&reading, &ScoringConfig::default()).unwrap();
        assert!((result.composite_score - 1.5 / 12.0).abs() < 1e-12);
        assert_eq!(result.per_feature_percentages().len(), 4);
    }

    #[test]
    fn test_findrisc_strategy_uses_history() {
        let reading = BiomarkerReading::new(30.0, 90.0, 5.0, Some(21.0)).with_history(true, true);
        let result = evaluate(&reading, &config(ScoringStrategy::Findrisc, DisplayProfile::Clinical)).unwrap();
        assert!((result.composite_score - 6.0 / 28.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_percentage_keeps_raw_index() {
        // every bar at 150% of its declared max
        let reading = BiomarkerReading::new(120.0, 450.0, 13.5, Some(60.0));
        let result = evaluate(&reading, &config(ScoringStrategy::MeanPercentage, DisplayProfile::Clinical)).unwrap();
        assert!((result.raw_index - 1.5).abs() < 1e-12);
        assert_eq!(result.composite_score, 1.0);
    }

    #[test]
    fn test_scan_falls_back_to_cutoff() {
        let reading = BiomarkerReading::new(61.0, 201.0, 6.6, Some(31.0));
        let report = scan(&reading, &ScoringConfig::default(), &IdentityScaler, None).unwrap();
        assert_eq!(report.prediction.label, RiskLabel::High);
        assert_eq!(report.label_source, LabelSource::CompositeCutoff);
        assert_eq!(report.features.family, ModelFamily::Clinical);
    }

    #[test]
    fn test_scan_uses_classifier_family() {
        let reading = BiomarkerReading::new(30.0, 100.0, 5.0, Some(22.0)).with_pima(PimaMarkers::default());
        let mock = MockClassifier::new(ModelFamily::Pima, RiskLabel::High);
        let report = scan(&reading, &ScoringConfig::default(), &IdentityScaler, Some(&mock)).unwrap();
        assert_eq!(report.features.family, ModelFamily::Pima);
        assert_eq!(report.features.len(), 8);
        assert_eq!(report.prediction.label, RiskLabel::High);
        assert_eq!(report.label_source, LabelSource::Model);
    }
}
