//! JSON-driven run configuration (§3, §5): loaded once at startup, never
//! mutated — re-tuning the plant requires a fresh document and a restart.

use std::path::Path;

use serde::{Deserialize, Serialize};
use simcore::Params;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub params: Params,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_pattern")]
    pub pattern: String,
    #[serde(default)]
    pub wind_intensity: f64,
}

fn default_algorithm() -> String {
    "PID".to_string()
}

fn default_pattern() -> String {
    "HOVER".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            params: Params::default(),
            algorithm: default_algorithm(),
            pattern: default_pattern(),
            wind_intensity: 0.0,
        }
    }
}

/// Loads a config document, falling back to defaults (with a logged
/// warning) when the file is missing or malformed — the run still starts.
pub fn load(path: impl AsRef<Path>) -> AppConfig {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(text) => match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("malformed config at {}: {err}; using defaults", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::warn!("no config at {}: {err}; using defaults", path.display());
            AppConfig::default()
        }
    }
}
