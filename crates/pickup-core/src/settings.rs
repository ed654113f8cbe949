use std::io;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{RateTable, Zone};
use crate::ConfigError;

/// Persisted plugin configuration: currency, served zone and the rate table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// ISO 4217 currency code the rates are expressed in.
    pub currency: String,
    pub rate_zone: Zone,
    #[serde(default)]
    pub rate: RateTable,
}

impl Settings {
    /// Checks the stored-data invariants: every location is non-empty and
    /// every amount is non-negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, entry) in self.rate.iter() {
            if entry.location.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "pick-up point '{id}' has an empty location"
                )));
            }

            for (field, value) in [
                ("cost", entry.cost),
                ("maxweight", entry.max_weight),
                ("free", entry.free_threshold),
            ] {
                if value < Decimal::ZERO {
                    return Err(ConfigError::Validation(format!(
                        "pick-up point '{id}' has negative {field} {value}"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Source of the current settings snapshot.
///
/// Each call returns an independent snapshot; callers never mutate it.
pub trait SettingsProvider {
    /// # Errors
    ///
    /// Returns `ConfigError` when the settings cannot be produced.
    fn settings(&self) -> Result<Settings, ConfigError>;
}

impl<P: SettingsProvider + ?Sized> SettingsProvider for &P {
    fn settings(&self) -> Result<Settings, ConfigError> {
        (**self).settings()
    }
}

impl<P: SettingsProvider + ?Sized> SettingsProvider for std::sync::Arc<P> {
    fn settings(&self) -> Result<Settings, ConfigError> {
        (**self).settings()
    }
}

impl SettingsProvider for Settings {
    fn settings(&self) -> Result<Settings, ConfigError> {
        Ok(self.clone())
    }
}

/// Settings stored in a YAML file, re-read on every call.
///
/// A file that does not exist yet yields [`Settings::default`], so a fresh
/// instance can still be configured and quoted.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsProvider for SettingsFile {
    fn settings(&self) -> Result<Settings, ConfigError> {
        match load_settings(&self.path) {
            Err(ConfigError::FileIo { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no settings file yet, using defaults");
                Ok(Settings::default())
            }
            other => other,
        }
    }
}

/// Load and validate settings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let settings: Settings =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })?;

    settings.validate()?;

    tracing::debug!(
        path = %path.display(),
        rates = settings.rate.len(),
        "loaded pick-up settings"
    );

    Ok(settings)
}
