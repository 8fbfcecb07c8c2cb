//! beacon-scorer — Biomarker risk scoring engine.
//! Composite heuristics, display normalisation, and the classifier seam.

pub mod additive;
pub mod findrisc;
pub mod normalise;
pub mod profiles;
pub mod features;
pub mod classifier;
pub mod scorer;

pub use additive::score;
pub use normalise::{normalize_for_display, SeverityBand};
pub use scorer::{evaluate, scan, LabelSource, RiskResult, ScanReport};
