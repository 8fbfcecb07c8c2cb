//! Plain-text rendering of a scan for the terminal.

use std::fmt::Write;

use beacon_common::{BiomarkerReading, BmiCategory};
use beacon_scorer::ScanReport;

/// Metrics strip shown above the scan button. BMI reads `--` until computed.
pub fn render_metrics(reading: &BiomarkerReading) -> String {
    let bmi = reading.bmi.map_or_else(|| "--".to_string(), |b| format!("{b:.2}"));
    match &reading.pima {
        Some(pima) => format!(
            "Age {} | BMI {} | Glucose {:.2} | DPF {:.2}",
            reading.age, bmi, reading.glucose, pima.diabetes_pedigree_function
        ),
        None => format!(
            "Age {} | BMI {} | Glucose {:.2} | HbA1c {:.2}",
            reading.age, bmi, reading.glucose, reading.hba1c
        ),
    }
}

pub fn render_bmi(bmi: f64) -> String {
    format!("Calculated BMI: {bmi:.2} ({})", BmiCategory::from_bmi(bmi))
}

/// Full scan report: metrics, biomarker breakdown, threat index, verdict.
pub fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", render_metrics(&report.reading));
    let _ = writeln!(out);
    let _ = writeln!(out, "Biomarker Breakdown");
    for bar in &report.risk.bars {
        let _ = writeln!(
            out,
            "  {:<12} {:>6.1}%  [{}]",
            bar.label,
            bar.percentage,
            bar.band.colour()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Current system threat index: {:.1}% ({})",
        report.risk.threat_index_percent(),
        report.risk.strategy
    );
    let _ = write!(out, "{}", report.prediction.label.message_for(report.features.family));
    out
}
