pub mod app_config;
pub mod config;
pub mod error;
pub mod locale;
pub mod model;
pub mod settings;

pub use app_config::{AppConfig, EmptyLocationPolicy, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, CoreError};
pub use locale::{Catalog, Localizer};
pub use model::{
    Address, DeliveryOption, Quote, RateEntry, RateId, RateTable, WeightUnit, Zone,
};
pub use settings::{load_settings, Settings, SettingsFile, SettingsProvider};
