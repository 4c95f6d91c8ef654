//! Engine configuration
//!
//! Settings resolve in layers, later layers winning: built-in defaults,
//! then `config/{RUST_ENV}.toml` if present, then `NT__`-prefixed
//! environment variables.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub storage: StorageConfig,
    pub recognition: RecognitionConfig,
    #[serde(default)]
    pub daily: DailyDefaults,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the local JSON stores
    pub dir: String,
}

/// Meal-recognition service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionConfig {
    pub base_url: String,
    /// Transport timeout; parse failures are handled separately and never
    /// governed by this
    pub timeout_secs: u64,
}

/// Per-day goal defaults applied when a daily log is first created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyDefaults {
    pub water_goal_glasses: u32,
    pub step_goal: u32,
}

impl Default for DailyDefaults {
    fn default() -> Self {
        Self {
            water_goal_glasses: 8,
            step_goal: 10_000,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                dir: "./data".to_string(),
            },
            recognition: RecognitionConfig {
                base_url: "http://localhost:8700".to_string(),
                timeout_secs: 30,
            },
            daily: DailyDefaults::default(),
        }
    }
}

impl EngineConfig {
    /// Resolve the configuration: defaults, then the `RUST_ENV` file if one
    /// exists, then `NT__` environment overrides.
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&EngineConfig::default())?)
            .add_source(config::File::with_name(&format!("config/{env}.toml")).required(false))
            // NT__RECOGNITION__BASE_URL=http://host:9000 sets recognition.base_url
            .add_source(config::Environment::with_prefix("NT").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Whether `RUST_ENV` selects production behavior
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
