use thiserror::Error;

/// Violations of the data model invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid pick-up point id {0:?}: must be non-empty and not \"0\"")]
    InvalidRateId(String),

    #[error("duplicate pick-up point id: {0}")]
    DuplicateRateId(String),

    #[error("unknown weight unit: {0}")]
    UnknownWeightUnit(String),

    #[error("unknown empty-location policy {0:?}; expected reject or drop")]
    UnknownPolicy(String),
}

/// Errors raised while loading process configuration or settings files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read {path}: {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    FileParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("settings validation failed: {0}")]
    Validation(String),
}
