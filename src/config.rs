// ⚙️ Simulation Config - Delays and input fallbacks
// Defaults match the demo; a JSON file or env vars may override them

use crate::scoring::{DEFAULT_CREDIT, DEFAULT_NAME};
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "CIVIC_TRUST_CONFIG";
pub const FIXED_TIMESTAMP_ENV: &str = "CIVIC_TRUST_FIXED_TIMESTAMP";
pub const STEP_MIN_ENV: &str = "CIVIC_TRUST_STEP_MIN_MS";
pub const STEP_MAX_ENV: &str = "CIVIC_TRUST_STEP_MAX_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Lower bound (inclusive) of each source step's pause
    pub step_delay_min_ms: u64,

    /// Upper bound (exclusive) of each source step's pause
    pub step_delay_max_ms: u64,

    /// Pause between the end of a run and the results scroll
    pub scroll_delay_ms: u64,

    pub default_name: String,

    pub default_credit: i64,

    /// Replaces wall-clock millis in the seed when set
    pub fixed_timestamp_ms: Option<i64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            step_delay_min_ms: 600,
            step_delay_max_ms: 1000,
            scroll_delay_ms: 100,
            default_name: DEFAULT_NAME.to_string(),
            default_credit: DEFAULT_CREDIT,
            fixed_timestamp_ms: None,
        }
    }
}

impl SimulationConfig {
    /// Load config from a JSON file; missing keys keep their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: SimulationConfig = serde_json::from_str(&content)
            .context("Failed to parse config JSON")?;

        Ok(config.normalized())
    }

    /// Defaults, then `CIVIC_TRUST_CONFIG` file, then per-field env overrides
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(&path)?,
            _ => SimulationConfig::default(),
        };

        if let Some(ts) = env_number::<i64>(FIXED_TIMESTAMP_ENV)? {
            config.fixed_timestamp_ms = Some(ts);
        }
        if let Some(ms) = env_number::<u64>(STEP_MIN_ENV)? {
            config.step_delay_min_ms = ms;
        }
        if let Some(ms) = env_number::<u64>(STEP_MAX_ENV)? {
            config.step_delay_max_ms = ms;
        }

        Ok(config.normalized())
    }

    /// Swap inverted delay bounds
    pub fn normalized(mut self) -> Self {
        if self.step_delay_min_ms > self.step_delay_max_ms {
            std::mem::swap(&mut self.step_delay_min_ms, &mut self.step_delay_max_ms);
        }
        self
    }

    /// Config for tests and replays: pinned timestamp
    pub fn with_fixed_timestamp(mut self, timestamp_ms: i64) -> Self {
        self.fixed_timestamp_ms = Some(timestamp_ms);
        self
    }
}

fn env_number<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("Invalid value for {}: {:?}", key, raw))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}
