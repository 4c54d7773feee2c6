//! Scanner configuration.
//!
//! Everything the engine reads is in [`Config`]: periods, computation modes,
//! scoring bands, risk settings and the prediction rule table. It is loaded
//! once from an optional JSON file, patched by environment overrides,
//! validated, and then passed by reference into every component.

pub mod types;
mod validate;

pub use types::*;

use std::env;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::error::ConfigError;

/// Deployment environment (`APP_ENV`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "sandbox".to_string())
        .to_lowercase()
}

impl Config {
    /// Load from `SCANNER_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("SCANNER_CONFIG").ok().filter(|p| !p.trim().is_empty()) {
            Some(path) => Self::load(Some(Path::new(&path))),
            None => Self::load(None),
        }
    }

    /// Read `path` (or start from defaults), apply env overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })?;
                info!(path = %path.display(), "loading scanner config");
                serde_json::from_str(&contents)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate without touching the environment.
    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Only non-empty env vars take effect. Parse failures are logged and the
    /// file value is kept.
    pub fn apply_env_overrides(&mut self) {
        if let Some(interval) = env_string("SCAN_INTERVAL") {
            info!(%interval, "env override: SCAN_INTERVAL");
            self.interval = interval;
        }

        if let Some(window) = env_parse::<usize>("SCAN_WINDOW_LENGTH") {
            info!(window, "env override: SCAN_WINDOW_LENGTH");
            self.window_length = window;
        }

        if let Some(ratio) = env_parse::<f64>("SCAN_RISK_REWARD_RATIO") {
            info!(ratio, "env override: SCAN_RISK_REWARD_RATIO");
            self.risk.risk_reward_ratio = ratio;
        }

        if let Some(pct) = env_parse::<f64>("SCAN_TRAILING_PCT") {
            info!(pct, "env override: SCAN_TRAILING_PCT");
            self.risk.trailing_pct = Some(pct);
        }

        if let Some(mode) = env_parse::<ScoreMode>("SCAN_SCORE_MODE") {
            info!(?mode, "env override: SCAN_SCORE_MODE");
            self.scoring.mode = mode;
        }
    }
}

fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = env_string(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable env override");
            None
        }
    }
}
