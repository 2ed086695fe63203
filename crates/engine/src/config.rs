//! Configuration loading
//!
//! Layers, lowest first: [`GameConfig`] defaults, an optional JSON file,
//! then `BLOCKFALL_*` environment variables. Command-line flags are applied
//! on top by the binary.

use std::env;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use blockfall_core::types::GameConfig;

pub const SPEED_MULTIPLIER_ENV: &str = "BLOCKFALL_SPEED_MULTIPLIER";
pub const HOLD_ALLOWED_ENV: &str = "BLOCKFALL_HOLD_ALLOWED";
pub const DISPLAY_GHOST_ENV: &str = "BLOCKFALL_DISPLAY_GHOST";
pub const DISPLAY_NEXT_ENV: &str = "BLOCKFALL_DISPLAY_NEXT";
pub const SEED_ENV: &str = "BLOCKFALL_SEED";

/// Load defaults, then `path` (if given), then the process environment
pub fn load_config(path: Option<&Path>) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => GameConfig::default(),
    };
    apply_env(&mut config, |key| env::var(key).ok());
    Ok(config)
}

/// Parse a JSON config file; missing fields keep their defaults
pub fn read_config_file(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parse config {}", path.display()))
}

pub fn parse_config(text: &str) -> Result<GameConfig> {
    Ok(serde_json::from_str(text)?)
}

/// Override fields from environment-style lookups.
///
/// Unparseable or empty values are ignored.
pub fn apply_env(config: &mut GameConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| {
        lookup(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    if let Some(v) = get(SPEED_MULTIPLIER_ENV).and_then(|s| s.parse::<f64>().ok()) {
        if v.is_finite() {
            config.speed_multiplier = v;
        }
    }
    if let Some(v) = get(HOLD_ALLOWED_ENV).and_then(|s| parse_flag(&s)) {
        config.hold_allowed = v;
    }
    if let Some(v) = get(DISPLAY_GHOST_ENV).and_then(|s| parse_flag(&s)) {
        config.display_ghost = v;
    }
    if let Some(v) = get(DISPLAY_NEXT_ENV).and_then(|s| parse_flag(&s)) {
        config.display_next = v;
    }
    if let Some(v) = get(SEED_ENV).and_then(|s| s.parse::<u64>().ok()) {
        config.seed = Some(v);
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config(r#"{ "speed_multiplier": 1.6, "display_ghost": false }"#)
            .expect("valid config");
        assert_eq!(config.speed_multiplier, 1.6);
        assert!(!config.display_ghost);
        assert!(config.display_next);
        assert!(config.hold_allowed);
        assert_eq!(config.base_speed_ms, 1000.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(parse_config("{ speed_multiplier: ").is_err());
    }

    #[test]
    fn env_overrides_fields() {
        let mut config = GameConfig::default();
        apply_env(
            &mut config,
            lookup(&[
                (SPEED_MULTIPLIER_ENV, "-0.8"),
                (HOLD_ALLOWED_ENV, "off"),
                (DISPLAY_NEXT_ENV, "0"),
                (SEED_ENV, " 42 "),
            ]),
        );
        assert_eq!(config.speed_multiplier, -0.8);
        assert!(!config.hold_allowed);
        assert!(!config.display_next);
        assert!(config.display_ghost);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let mut config = GameConfig::default();
        apply_env(
            &mut config,
            lookup(&[
                (SPEED_MULTIPLIER_ENV, "fast"),
                (HOLD_ALLOWED_ENV, "maybe"),
                (SEED_ENV, ""),
            ]),
        );
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = read_config_file(Path::new("/nonexistent/blockfall.json"))
            .expect_err("file does not exist");
        assert!(format!("{:#}", err).contains("/nonexistent/blockfall.json"));
    }
}
