use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
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

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "value must be non-empty".to_string(),
            });
        }
        Ok(raw.trim().to_string())
    };

    let env = parse_environment(&or_default("KOSAR_ENV", "development")).ok_or_else(|| {
        ConfigError::InvalidEnvVar {
            var: "KOSAR_ENV".to_string(),
            reason: "expected one of: development, test, production".to_string(),
        }
    })?;

    let log_level = or_default("KOSAR_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(non_empty("KOSAR_DATA_DIR", "./data/markets_data")?);
    let market = non_empty("KOSAR_MARKET", "spar")?.to_lowercase();
    let store_name = non_empty("KOSAR_STORE_NAME", "Spar")?;
    let overrides_dir = PathBuf::from(non_empty("KOSAR_OVERRIDES_DIR", "./config/overrides")?);
    let columns_path = PathBuf::from(non_empty("KOSAR_COLUMNS_PATH", "./config/columns.yaml")?);

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        market,
        store_name,
        overrides_dir,
        columns_path,
    })
}

/// Parse a string into an `Environment` variant. Returns `None` for
/// unrecognized values.
fn parse_environment(s: &str) -> Option<Environment> {
    match s.trim().to_lowercase().as_str() {
        "development" | "dev" => Some(Environment::Development),
        "test" => Some(Environment::Test),
        "production" | "prod" => Some(Environment::Production),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
