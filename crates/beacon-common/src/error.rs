use thiserror::Error;

#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("Scan lock: compute BMI first to proceed.")]
    BmiMissing,

    #[error("Missing field for feature vector: {0}")]
    MissingField(String),

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model artifact error: {0}")]
    Model(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BeaconError>;
