//! End-to-end checks of the public scoring API.

use beacon_common::{BeaconError, BiomarkerReading, DisplayProfile, Gender, ScoringConfig, ScoringStrategy};
use beacon_scorer::classifier::{IdentityScaler, LogisticClassifier, RiskLabel, StandardScaler};
use beacon_scorer::features::ModelFamily;
use beacon_scorer::{evaluate, normalize_for_display, scan, score, LabelSource};
use pretty_assertions::assert_eq;

#[test]
fn test_documented_examples() {
    assert_eq!(score(46.0, 0.0, 0.0, 0.0), 1.5 / 12.0);
    assert_eq!(score(61.0, 201.0, 6.6, 31.0), 1.0);
    assert_eq!(score(45.0, 0.0, 0.0, 0.0), 0.0);
    assert_eq!(normalize_for_display(40.0, 80.0), 50.0);
    assert_eq!(normalize_for_display(90.0, 80.0), 112.5);
}

#[test]
fn test_findrisc_extremes_through_evaluate() {
    let config = ScoringConfig { strategy: ScoringStrategy::Findrisc, ..Default::default() };

    let low = BiomarkerReading::new(30.0, 90.0, 5.0, Some(21.0));
    assert_eq!(evaluate(&low, &config).unwrap().composite_score, 0.0);

    let high = BiomarkerReading::new(70.0, 250.0, 8.5, Some(38.0)).with_history(true, true);
    assert_eq!(evaluate(&high, &config).unwrap().composite_score, 1.0);
}

#[test]
fn test_unset_bmi_blocks_every_strategy() {
    let reading = BiomarkerReading::default();
    for strategy in [ScoringStrategy::Additive, ScoringStrategy::Findrisc, ScoringStrategy::MeanPercentage] {
        let config = ScoringConfig { strategy, ..Default::default() };
        assert!(matches!(evaluate(&reading, &config), Err(BeaconError::BmiMissing)));
        assert!(matches!(
            scan(&reading, &config, &IdentityScaler, None),
            Err(BeaconError::BmiMissing)
        ));
    }
}

#[test]
fn test_scan_with_scaled_logistic_model() {
    let scaler = StandardScaler::new(
        ModelFamily::Clinical,
        vec![0.5, 45.0, 0.2, 0.1, 27.0, 5.8, 140.0],
        vec![0.5, 15.0, 0.4, 0.3, 6.0, 1.0, 40.0],
    )
    .unwrap();
    // glucose and hba1c dominate
    let model = LogisticClassifier {
        family: ModelFamily::Clinical,
        coefficients: vec![0.0, 0.2, 0.1, 0.1, 0.3, 1.5, 1.5],
        intercept: -0.5,
        threshold: 0.5,
    };

    let config = ScoringConfig::default();
    let sick = BiomarkerReading::new(62.0, 240.0, 8.2, Some(33.0))
        .with_gender(Gender::Male)
        .with_history(true, false);
    let report = scan(&sick, &config, &scaler, Some(&model)).unwrap();
    assert_eq!(report.label_source, LabelSource::Model);
    assert_eq!(report.prediction.label, RiskLabel::High);

    let well = BiomarkerReading::new(25.0, 85.0, 4.8, Some(21.0)).with_gender(Gender::Female);
    let report = scan(&well, &config, &scaler, Some(&model)).unwrap();
    assert_eq!(report.prediction.label, RiskLabel::Low);
    assert!(report.prediction.probability.unwrap() < 0.5);
}

#[test]
fn test_report_serialises_for_display_layer() {
    let config = ScoringConfig { profile: DisplayProfile::Clinical, ..Default::default() };
    let reading = BiomarkerReading::new(40.0, 150.0, 4.5, Some(20.0));
    let report = scan(&reading, &config, &IdentityScaler, None).unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["risk"]["bars"][0]["label"], "Age");
    assert_eq!(json["risk"]["bars"][0]["percentage"], 50.0);
    assert_eq!(json["prediction"]["label"], "low");
    assert_eq!(json["label_source"], "composite_cutoff");
}
