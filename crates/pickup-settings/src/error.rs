use pickup_core::locale::messages;
use pickup_core::Localizer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("pick-up point '{rate_id}' has an empty location")]
    EmptyLocation { rate_id: String },

    #[error("invalid pick-up point id {0:?}")]
    InvalidRateId(String),

    #[error("duplicate pick-up point id: {0}")]
    DuplicateRateId(String),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl SettingsError {
    /// Returns `true` for errors caused by what the administrator submitted,
    /// as opposed to failures of the renderer itself.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        !matches!(self, SettingsError::Template(_))
    }

    /// Message suitable for showing next to the settings form.
    pub fn user_message<L>(&self, localizer: &L) -> String
    where
        L: Localizer + ?Sized,
    {
        match self {
            SettingsError::EmptyLocation { .. } => localizer.translate(messages::EMPTY_LOCATION),
            SettingsError::InvalidRateId(_) | SettingsError::DuplicateRateId(_) => {
                localizer.translate(messages::INVALID_RATE_ID)
            }
            other => other.to_string(),
        }
    }
}
