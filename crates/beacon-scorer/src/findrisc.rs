//! FINDRISC-style point buckets.
//!
//! Each marker falls into one band; the band's points are summed and
//! divided by 28, the sum of every marker's top band.

/// (lower edge, points), ascending. A value earns the points of the highest
/// edge it strictly exceeds; values at or below the first edge earn 0.
type Bands = &'static [(f64, f64)];

pub const AGE_BANDS: Bands = &[(35.0, 2.0), (45.0, 4.0), (60.0, 6.0)];
pub const BMI_BANDS: Bands = &[(23.0, 1.0), (27.0, 2.0), (30.0, 4.0)];
pub const GLUCOSE_BANDS: Bands = &[(100.0, 3.0), (125.0, 6.0)];
pub const HBA1C_BANDS: Bands = &[(5.7, 3.0), (6.5, 6.0)];
pub const HYPERTENSION_POINTS: f64 = 3.0;
pub const HEART_DISEASE_POINTS: f64 = 3.0;

pub const FINDRISC_CEILING: f64 = 28.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FindriscInputs {
    pub age: f64,
    pub bmi: f64,
    pub hypertension: bool,
    pub heart_disease: bool,
    pub glucose: f64,
    pub hba1c: f64,
}

fn band_points(value: f64, bands: Bands) -> f64 {
    bands
        .iter()
        .rev()
        .find(|(edge, _)| value > *edge)
        .map_or(0.0, |(_, points)| *points)
}

pub fn findrisc_points(inputs: &FindriscInputs) -> f64 {
    let mut points = band_points(inputs.age, AGE_BANDS)
        + band_points(inputs.bmi, BMI_BANDS)
        + band_points(inputs.glucose, GLUCOSE_BANDS)
        + band_points(inputs.hba1c, HBA1C_BANDS);

    if inputs.hypertension {
        points += HYPERTENSION_POINTS;
    }
    if inputs.heart_disease {
        points += HEART_DISEASE_POINTS;
    }
    points
}

/// Composite fraction: `points / 28`, clamped to [0, 1].
pub fn findrisc_score(inputs: &FindriscInputs) -> f64 {
    (findrisc_points(inputs) / FINDRISC_CEILING).clamp(0.0, 1.0)
}

fn top(bands: Bands) -> f64 {
    bands.last().map_or(0.0, |(_, points)| *points)
}

/// Highest attainable point total.
pub fn maximum_points() -> f64 {
    top(AGE_BANDS)
        + top(BMI_BANDS)
        + top(GLUCOSE_BANDS)
        + top(HBA1C_BANDS)
        + HYPERTENSION_POINTS
        + HEART_DISEASE_POINTS
}
