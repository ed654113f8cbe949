use crate::app_config::{AppConfig, EmptyLocationPolicy, Environment};
use crate::ConfigError;

/// Load process configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load process configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function, so tests
/// can drive it from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("PICKUP_ENV", "development"))?;

    let raw_bind = or_default("PICKUP_BIND_ADDR", "0.0.0.0:3000");
    let bind_addr = raw_bind
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "PICKUP_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;

    let log_level = or_default("PICKUP_LOG_LEVEL", "info");
    let settings_path = PathBuf::from(or_default("PICKUP_SETTINGS_PATH", "./config/settings.yaml"));
    let reference_path = PathBuf::from(or_default(
        "PICKUP_REFERENCE_PATH",
        "./config/reference.yaml",
    ));
    let locale = or_default("PICKUP_LOCALE", "en_US");
    let empty_location_policy =
        parse_empty_location_policy(&or_default("PICKUP_EMPTY_LOCATION_POLICY", "reject"))?;

    let region_lookup_url = or_default("PICKUP_REGION_LOOKUP_URL", "/api/v1/regions");
    if region_lookup_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "PICKUP_REGION_LOOKUP_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        settings_path,
        reference_path,
        locale,
        empty_location_policy,
        region_lookup_url,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PICKUP_ENV".to_string(),
            reason: format!("unknown environment {other:?}; expected development, test or production"),
        }),
    }
}

fn parse_empty_location_policy(s: &str) -> Result<EmptyLocationPolicy, ConfigError> {
    s.parse().map_err(|e: crate::CoreError| ConfigError::InvalidEnvVar {
        var: "PICKUP_EMPTY_LOCATION_POLICY".to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
