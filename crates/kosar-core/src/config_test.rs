use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development"),
        Some(Environment::Development)
    );
    assert_eq!(parse_environment("test"), Some(Environment::Test));
    assert_eq!(parse_environment("PRODUCTION"), Some(Environment::Production));
}

#[test]
fn parse_environment_unknown_is_none() {
    assert_eq!(parse_environment("staging"), None);
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.data_dir, PathBuf::from("./data/markets_data"));
    assert_eq!(cfg.market, "spar");
    assert_eq!(cfg.store_name, "Spar");
    assert_eq!(cfg.overrides_dir, PathBuf::from("./config/overrides"));
    assert_eq!(cfg.columns_path, PathBuf::from("./config/columns.yaml"));
}

#[test]
fn build_app_config_rejects_unknown_environment() {
    let mut map = HashMap::new();
    map.insert("KOSAR_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KOSAR_ENV"),
        "expected InvalidEnvVar(KOSAR_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_market_is_lowercased() {
    let mut map = HashMap::new();
    map.insert("KOSAR_MARKET", "Spar");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.market, "spar");
}

#[test]
fn build_app_config_rejects_blank_store_name() {
    let mut map = HashMap::new();
    map.insert("KOSAR_STORE_NAME", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KOSAR_STORE_NAME"),
        "expected InvalidEnvVar(KOSAR_STORE_NAME), got: {result:?}"
    );
}

#[test]
fn build_app_config_overrides_paths() {
    let mut map = HashMap::new();
    map.insert("KOSAR_DATA_DIR", "/srv/markets");
    map.insert("KOSAR_OVERRIDES_DIR", "/srv/overrides");
    map.insert("KOSAR_COLUMNS_PATH", "/srv/columns.yaml");
    map.insert("KOSAR_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.data_dir, PathBuf::from("/srv/markets"));
    assert_eq!(cfg.overrides_dir, PathBuf::from("/srv/overrides"));
    assert_eq!(cfg.columns_path, PathBuf::from("/srv/columns.yaml"));
    assert_eq!(cfg.log_level, "debug");
}
