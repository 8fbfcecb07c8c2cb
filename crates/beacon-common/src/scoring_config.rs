//! Scoring configuration.
//!
//! Selects the composite strategy and the display profile, and carries the
//! input ranges the form layer clamps to. Loadable from YAML, JSON or TOML.

use serde::{Deserialize, Serialize};

use crate::error::{BeaconError, Result};

/// Complete scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Composite risk strategy
    #[serde(default)]
    pub strategy: ScoringStrategy,

    /// Declared maxima used for the bar chart
    #[serde(default)]
    pub profile: DisplayProfile,

    /// Composite fraction at or above which the fallback classifier says "high"
    #[serde(default = "default_cutoff")]
    pub classifier_cutoff: f64,

    /// Clamp ranges applied by the form layer
    #[serde(default)]
    pub ranges: InputRanges,

    /// Declared maxima per display profile
    #[serde(default)]
    pub maxima: DisplayMaxima,

    /// Operator-supplied model artifacts
    #[serde(default)]
    pub model: ModelArtifacts,
}

fn default_cutoff() -> f64 { 0.5 }

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: ScoringStrategy::default(),
            profile: DisplayProfile::default(),
            classifier_cutoff: default_cutoff(),
            ranges: InputRanges::default(),
            maxima: DisplayMaxima::default(),
            model: ModelArtifacts::default(),
        }
    }
}

// ── Strategy ──────────────────────────────────────────────────────────────────

/// Which composite heuristic produces the [0,1] risk fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Threshold-additive points divided by 12
    #[default]
    Additive,
    /// Point buckets divided by 28
    Findrisc,
    /// Mean of the display percentages divided by 100
    MeanPercentage,
}

impl std::fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringStrategy::Additive => write!(f, "additive"),
            ScoringStrategy::Findrisc => write!(f, "findrisc"),
            ScoringStrategy::MeanPercentage => write!(f, "mean_percentage"),
        }
    }
}

impl std::str::FromStr for ScoringStrategy {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "additive" => Ok(ScoringStrategy::Additive),
            "findrisc" => Ok(ScoringStrategy::Findrisc),
            "mean_percentage" | "mean" => Ok(ScoringStrategy::MeanPercentage),
            other => Err(BeaconError::Config(format!("unknown scoring strategy '{other}'"))),
        }
    }
}

// ── Display profile ───────────────────────────────────────────────────────────

/// Named set of declared maxima. The two sets disagree on BMI and glucose,
/// so callers must pick the one matching their feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DisplayProfile {
    /// 4 bars: age 80, bmi 40, glucose 300, hba1c 9
    #[default]
    Clinical,
    /// 8 bars: age 80, pregnancies 17, glucose 200, bp 122, skin 99,
    /// insulin 845, dpf 2.42, bmi 60
    Pima,
}

impl std::fmt::Display for DisplayProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayProfile::Clinical => write!(f, "clinical"),
            DisplayProfile::Pima => write!(f, "pima"),
        }
    }
}

impl std::str::FromStr for DisplayProfile {
    type Err = BeaconError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clinical" => Ok(DisplayProfile::Clinical),
            "pima" => Ok(DisplayProfile::Pima),
            other => Err(BeaconError::Config(format!("unknown display profile '{other}'"))),
        }
    }
}

// ── Input ranges ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Never panics: with inverted bounds the result is `max`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Ranges the form layer clamps raw input into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputRanges {
    #[serde(default = "default_age")]
    pub age: Bounds,
    #[serde(default = "default_glucose")]
    pub glucose: Bounds,
    #[serde(default = "default_hba1c")]
    pub hba1c: Bounds,
    #[serde(default = "default_weight")]
    pub weight_kg: Bounds,
    #[serde(default = "default_height")]
    pub height_cm: Bounds,
}

fn default_age() -> Bounds { Bounds::new(10.0, 80.0) }
fn default_glucose() -> Bounds { Bounds::new(70.0, 300.0) }
fn default_hba1c() -> Bounds { Bounds::new(4.0, 9.0) }
fn default_weight() -> Bounds { Bounds::new(1.0, 300.0) }
fn default_height() -> Bounds { Bounds::new(30.0, 250.0) }

impl Default for InputRanges {
    fn default() -> Self {
        Self {
            age: default_age(),
            glucose: default_glucose(),
            hba1c: default_hba1c(),
            weight_kg: default_weight(),
            height_cm: default_height(),
        }
    }
}

// ── Declared maxima ───────────────────────────────────────────────────────────

/// Maxima for the 4-bar clinical chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalMaxima {
    pub age: f64,
    pub bmi: f64,
    pub glucose: f64,
    pub hba1c: f64,
}

impl Default for ClinicalMaxima {
    fn default() -> Self {
        Self {
            age:     80.0,
            bmi:     40.0,
            glucose: 300.0,
            hba1c:   9.0,
        }
    }
}

/// Maxima for the 8-bar Pima chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PimaMaxima {
    pub age: f64,
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub diabetes_pedigree_function: f64,
    /// BMI typically tops out near 60 clinically
    pub bmi: f64,
}

impl Default for PimaMaxima {
    fn default() -> Self {
        Self {
            age:                        80.0,
            pregnancies:                17.0,
            glucose:                    200.0,
            blood_pressure:             122.0,
            skin_thickness:             99.0,
            insulin:                    845.0,
            diabetes_pedigree_function: 2.42,
            bmi:                        60.0,
        }
    }
}

/// Both maxima sets. They disagree on BMI (40 vs 60) and glucose (300 vs
/// 200); the display profile picks one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayMaxima {
    #[serde(default)]
    pub clinical: ClinicalMaxima,
    #[serde(default)]
    pub pima: PimaMaxima,
}

impl DisplayMaxima {
    fn entries(&self) -> [(&'static str, f64); 12] {
        let c = &self.clinical;
        let p = &self.pima;
        [
            ("clinical.age", c.age),
            ("clinical.bmi", c.bmi),
            ("clinical.glucose", c.glucose),
            ("clinical.hba1c", c.hba1c),
            ("pima.age", p.age),
            ("pima.pregnancies", p.pregnancies),
            ("pima.glucose", p.glucose),
            ("pima.blood_pressure", p.blood_pressure),
            ("pima.skin_thickness", p.skin_thickness),
            ("pima.insulin", p.insulin),
            ("pima.diabetes_pedigree_function", p.diabetes_pedigree_function),
            ("pima.bmi", p.bmi),
        ]
    }
}

// ── Model artifacts ───────────────────────────────────────────────────────────

/// Paths to externally trained artifacts (JSON). Either may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModelArtifacts {
    pub scaler_path: Option<String>,
    pub classifier_path: Option<String>,
}

// ── Helper Methods ─────────────────────────────────────────────────────────────

impl ScoringConfig {
    /// Load from YAML file
    pub fn from_yaml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from JSON file
    pub fn from_json(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file
    pub fn from_toml(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the cutoff, every clamp range, and every declared maximum.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.classifier_cutoff) {
            return Err(BeaconError::Config(format!(
                "classifier_cutoff {} outside [0, 1]",
                self.classifier_cutoff
            )));
        }
        let ranges = [
            ("age", self.ranges.age),
            ("glucose", self.ranges.glucose),
            ("hba1c", self.ranges.hba1c),
            ("weight_kg", self.ranges.weight_kg),
            ("height_cm", self.ranges.height_cm),
        ];
        for (name, bounds) in ranges {
            if !bounds.is_valid() {
                return Err(BeaconError::Config(format!(
                    "range for {name} is empty: [{}, {}]",
                    bounds.min, bounds.max
                )));
            }
        }
        for (name, max) in self.maxima.entries() {
            if !max.is_finite() || max <= 0.0 {
                return Err(BeaconError::Config(format!(
                    "declared maximum {name} must be positive, got {max}"
                )));
            }
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.strategy, ScoringStrategy::Additive);
        assert_eq!(config.profile, DisplayProfile::Clinical);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("FINDRISC".parse::<ScoringStrategy>().unwrap(), ScoringStrategy::Findrisc);
        assert_eq!(
            "mean-percentage".parse::<ScoringStrategy>().unwrap(),
            ScoringStrategy::MeanPercentage
        );
        assert!("linear".parse::<ScoringStrategy>().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ScoringConfig = toml::from_str(
            r#"
            strategy = "findrisc"
            profile = "pima"

            [ranges.age]
            min = 18.0
            max = 90.0
            "#,
        )
        .unwrap();
        assert_eq!(config.strategy, ScoringStrategy::Findrisc);
        assert_eq!(config.profile, DisplayProfile::Pima);
        assert_eq!(config.ranges.age.max, 90.0);
        assert_eq!(config.ranges.glucose, Bounds::new(70.0, 300.0));
        assert_eq!(config.classifier_cutoff, 0.5);
    }

    #[test]
    fn test_validate_rejects_bad_cutoff_and_range() {
        let mut config = ScoringConfig { classifier_cutoff: 1.5, ..Default::default() };
        assert!(config.validate().is_err());

        config.classifier_cutoff = 0.5;
        config.ranges.hba1c = Bounds::new(9.0, 4.0);
        assert!(matches!(config.validate(), Err(BeaconError::Config(_))));
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = ScoringConfig {
            strategy: ScoringStrategy::MeanPercentage,
            ..Default::default()
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.strategy, ScoringStrategy::MeanPercentage);
    }

    fn scratch_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("beacon-scoring-{}-{name}", std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_clamp_with_inverted_bounds_does_not_panic() {
        let inverted = Bounds::new(80.0, 10.0);
        assert_eq!(inverted.clamp(45.0), 10.0);
        assert_eq!(Bounds::new(10.0, 80.0).clamp(95.0), 80.0);
        assert_eq!(Bounds::new(10.0, 80.0).clamp(5.0), 10.0);
    }

    #[test]
    fn test_to_yaml_then_from_yaml_file() {
        let config = ScoringConfig {
            strategy: ScoringStrategy::Findrisc,
            profile: DisplayProfile::Pima,
            classifier_cutoff: 0.4,
            ..Default::default()
        };
        let path = std::env::temp_dir()
            .join(format!("beacon-scoring-{}-roundtrip.yaml", std::process::id()));
        config.to_yaml(path.to_str().unwrap()).unwrap();
        let loaded = ScoringConfig::from_yaml(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.strategy, ScoringStrategy::Findrisc);
        assert_eq!(loaded.profile, DisplayProfile::Pima);
        assert_eq!(loaded.classifier_cutoff, 0.4);
        assert_eq!(loaded.maxima, DisplayMaxima::default());
    }

    #[test]
    fn test_from_json_file() {
        let path = scratch_file(
            "config.json",
            r#"{"strategy": "mean_percentage", "ranges": {"hba1c": {"min": 3.5, "max": 10.0}}}"#,
        );
        let loaded = ScoringConfig::from_json(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.strategy, ScoringStrategy::MeanPercentage);
        assert_eq!(loaded.ranges.hba1c, Bounds::new(3.5, 10.0));
        assert_eq!(loaded.ranges.age, Bounds::new(10.0, 80.0));
    }

    #[test]
    fn test_from_toml_file_with_maxima_override() {
        let path = scratch_file(
            "config.toml",
            r#"
            profile = "pima"

            [maxima.pima]
            bmi = 50.0
            "#,
        );
        let loaded = ScoringConfig::from_toml(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.maxima.pima.bmi, 50.0);
        assert_eq!(loaded.maxima.pima.glucose, 200.0);
        assert_eq!(loaded.maxima.clinical, ClinicalMaxima::default());
    }

    #[test]
    fn test_loaders_reject_inverted_range() {
        let path = scratch_file(
            "inverted.toml",
            r#"
            [ranges.age]
            min = 80.0
            max = 10.0
            "#,
        );
        let result = ScoringConfig::from_toml(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());

        let path = scratch_file("bad-cutoff.json", r#"{"classifier_cutoff": 2.0}"#);
        let result = ScoringConfig::from_json(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());

        let path = scratch_file("inverted.yaml", "ranges:\n  glucose:\n    min: 300.0\n    max: 70.0\n");
        let result = ScoringConfig::from_yaml(path.to_str().unwrap());
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_maximum() {
        let mut config = ScoringConfig::default();
        config.maxima.clinical.hba1c = 0.0;
        assert!(matches!(config.validate(), Err(BeaconError::Config(_))));

        let mut config = ScoringConfig::default();
        config.maxima.pima.insulin = f64::NAN;
        assert!(config.validate().is_err());
    }
}
