//! Threshold-additive risk heuristic.
//!
//! Each rule awards its points when the marker strictly exceeds the
//! threshold; the second rule per marker stacks on top of the first.
//! The sum is divided by a fixed ceiling of 12 and capped at 1.0, so the
//! fraction saturates well before the nominal maximum of 18 points.

use serde::{Deserialize, Serialize};

/// Marker a threshold rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Marker {
    Age,
    Glucose,
    Hba1c,
    Bmi,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdditiveRule {
    pub marker: Marker,
    pub threshold: f64,
    pub points: f64,
}

const fn rule(marker: Marker, threshold: f64, points: f64) -> AdditiveRule {
    AdditiveRule { marker, threshold, points }
}

pub const ADDITIVE_RULES: [AdditiveRule; 8] = [
    rule(Marker::Age, 45.0, 1.5),
    rule(Marker::Age, 60.0, 2.0),
    rule(Marker::Glucose, 140.0, 2.5),
    rule(Marker::Glucose, 200.0, 3.0),
    rule(Marker::Hba1c, 5.7, 2.0),
    rule(Marker::Hba1c, 6.5, 3.0),
    rule(Marker::Bmi, 27.0, 1.5),
    rule(Marker::Bmi, 30.0, 2.5),
];

/// Divisor applied to the raw points.
pub const ADDITIVE_CEILING: f64 = 12.0;

/// Sum of every rule's points (18.0).
pub fn nominal_maximum() -> f64 {
    ADDITIVE_RULES.iter().map(|r| r.points).sum()
}

/// Raw points before normalisation.
pub fn raw_points(age: f64, glucose: f64, hba1c: f64, bmi: f64) -> f64 {
    ADDITIVE_RULES
        .iter()
        .filter(|r| {
            let value = match r.marker {
                Marker::Age => age,
                Marker::Glucose => glucose,
                Marker::Hba1c => hba1c,
                Marker::Bmi => bmi,
            };
            value > r.threshold
        })
        .map(|r| r.points)
        .sum()
}

/// Composite fraction: `min(raw / 12, 1.0)`.
pub fn score(age: f64, glucose: f64, hba1c: f64, bmi: f64) -> f64 {
    (raw_points(age, glucose, hba1c, bmi) / ADDITIVE_CEILING).min(1.0)
}
