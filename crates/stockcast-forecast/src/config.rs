//! Runtime configuration.
//!
//! Values resolve as: explicit overrides (CLI flags), then environment
//! variables, then defaults.

use std::path::PathBuf;
use std::str::FromStr;

use stockcast_core::{HistoryPeriod, ValidationError};

pub const BASE_DIR_ENV: &str = "STOCKCAST_BASE_DIR";
pub const MODEL_FILE_ENV: &str = "STOCKCAST_MODEL_FILE";
pub const HISTORY_PERIOD_ENV: &str = "STOCKCAST_HISTORY_PERIOD";

pub const DEFAULT_MODEL_FILE: &str = "stock_model.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastConfig {
    /// Application base directory; the model artifact is resolved against it.
    pub base_dir: PathBuf,
    pub model_file: String,
    pub history_period: HistoryPeriod,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            model_file: String::from(DEFAULT_MODEL_FILE),
            history_period: HistoryPeriod::default(),
        }
    }
}

impl ForecastConfig {
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup; blank values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(base_dir) = read(BASE_DIR_ENV) {
            config.base_dir = PathBuf::from(base_dir);
        }
        if let Some(model_file) = read(MODEL_FILE_ENV) {
            config.model_file = model_file;
        }
        if let Some(period) = read(HISTORY_PERIOD_ENV) {
            config.history_period = HistoryPeriod::from_str(&period)?;
        }

        Ok(config)
    }

    pub fn model_path(&self) -> PathBuf {
        self.base_dir.join(&self.model_file)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_resolve_model_in_working_directory() {
        let config = ForecastConfig::from_lookup(lookup(&[])).expect("defaults");
        assert_eq!(config.model_path(), PathBuf::from("./stock_model.json"));
        assert_eq!(config.history_period, HistoryPeriod::FiveYears);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = ForecastConfig::from_lookup(lookup(&[
            (BASE_DIR_ENV, "/srv/stockcast"),
            (MODEL_FILE_ENV, "lstm.json"),
            (HISTORY_PERIOD_ENV, "2y"),
        ]))
        .expect("valid environment");

        assert_eq!(config.model_path(), PathBuf::from("/srv/stockcast/lstm.json"));
        assert_eq!(config.history_period, HistoryPeriod::TwoYears);
    }

    #[test]
    fn blank_values_are_ignored() {
        let config =
            ForecastConfig::from_lookup(lookup(&[(MODEL_FILE_ENV, "  ")])).expect("defaults");
        assert_eq!(config.model_file, DEFAULT_MODEL_FILE);
    }

    #[test]
    fn invalid_period_is_rejected() {
        let err = ForecastConfig::from_lookup(lookup(&[(HISTORY_PERIOD_ENV, "3w")]))
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidPeriod { .. }));
    }
}
