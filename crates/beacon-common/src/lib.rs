//! beacon-common — Shared types, errors, and configuration used across all BloodBeacon crates.

pub mod error;
pub mod entities;
pub mod bmi;
pub mod scoring_config;

// Re-export commonly used types
pub use error::{BeaconError, Result};
pub use bmi::{compute_bmi, BmiCategory};
pub use entities::{BiomarkerReading, Gender, GatedReading, PimaMarkers};
pub use scoring_config::{DisplayMaxima, DisplayProfile, InputRanges, ScoringConfig, ScoringStrategy};
