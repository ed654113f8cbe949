use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// What a settings save does with a rate row whose location is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyLocationPolicy {
    /// Fail the whole save with a validation error.
    #[default]
    Reject,
    /// Omit the row and keep the rest.
    Drop,
}

impl std::str::FromStr for EmptyLocationPolicy {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(EmptyLocationPolicy::Reject),
            "drop" => Ok(EmptyLocationPolicy::Drop),
            other => Err(crate::CoreError::UnknownPolicy(other.to_string())),
        }
    }
}

impl std::fmt::Display for EmptyLocationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyLocationPolicy::Reject => write!(f, "reject"),
            EmptyLocationPolicy::Drop => write!(f, "drop"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub settings_path: PathBuf,
    pub reference_path: PathBuf,
    pub locale: String,
    pub empty_location_policy: EmptyLocationPolicy,
    pub region_lookup_url: String,
}
