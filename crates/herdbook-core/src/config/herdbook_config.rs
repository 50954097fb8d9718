//! Top-level Herdbook configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{EngineConfig, LogConfig, StorageConfig};
use crate::errors::ConfigError;
use crate::models::AdjustmentHorizon;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`HERDBOOK_*`)
/// 2. Project config (`herdbook.toml` in project root)
/// 3. User config (`~/.herdbook/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HerdbookConfig {
    pub storage: StorageConfig,
    pub engine: EngineConfig,
    pub log: LogConfig,
}

impl HerdbookConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority file layer: user config.
        if let Some(user_config_path) = user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
                tracing::debug!(path = %user_config_path.display(), "user config merged");
            }
        }

        // Project config.
        let project_config_path = root.join("herdbook.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
            tracing::debug!(path = %project_config_path.display(), "project config merged");
        }

        // Highest priority: environment variables.
        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the resolved configuration.
    pub fn validate(config: &HerdbookConfig) -> Result<(), ConfigError> {
        if let Some(days) = config.engine.weight_adjustment_days {
            if AdjustmentHorizon::from_days(i64::from(days)).is_none() {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.weight_adjustment_days".to_string(),
                    message: "must be 60, 120 or 180".to_string(),
                });
            }
        }
        if let Some(pct) = config.engine.max_female_percentage_per_male {
            if !pct.is_finite() || pct <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.max_female_percentage_per_male".to_string(),
                    message: "must be a positive percentage".to_string(),
                });
            }
        }
        if let Some(score) = config.engine.default_body_condition_score {
            if !(1..=5).contains(&score) {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.default_body_condition_score".to_string(),
                    message: "must be between 1 and 5".to_string(),
                });
            }
        }
        if let Some(weight) = config.engine.default_dam_weight {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "engine.default_dam_weight".to_string(),
                    message: "must be a positive weight in kg".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut HerdbookConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: HerdbookConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`: `other` wins wherever it has a value.
    fn merge(base: &mut HerdbookConfig, other: &HerdbookConfig) {
        if other.storage.path.is_some() {
            base.storage.path = other.storage.path.clone();
        }

        if other.engine.heritability.is_some() {
            base.engine.heritability = other.engine.heritability;
        }
        if other.engine.weight_adjustment_days.is_some() {
            base.engine.weight_adjustment_days = other.engine.weight_adjustment_days;
        }
        if other.engine.min_age_male_months.is_some() {
            base.engine.min_age_male_months = other.engine.min_age_male_months;
        }
        if other.engine.min_age_female_months.is_some() {
            base.engine.min_age_female_months = other.engine.min_age_female_months;
        }
        if other.engine.max_female_percentage_per_male.is_some() {
            base.engine.max_female_percentage_per_male =
                other.engine.max_female_percentage_per_male;
        }
        if other.engine.default_dam_weight.is_some() {
            base.engine.default_dam_weight = other.engine.default_dam_weight;
        }
        if other.engine.default_body_condition_score.is_some() {
            base.engine.default_body_condition_score =
                other.engine.default_body_condition_score;
        }

        if other.log.filter.is_some() {
            base.log.filter = other.log.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `HERDBOOK_STORAGE_PATH`, `HERDBOOK_ENGINE_HERITABILITY`, etc.
    fn apply_env_overrides(config: &mut HerdbookConfig) {
        if let Ok(val) = std::env::var("HERDBOOK_STORAGE_PATH") {
            config.storage.path = Some(val.into());
        }
        if let Ok(val) = std::env::var("HERDBOOK_ENGINE_HERITABILITY") {
            if let Ok(v) = val.parse::<f64>() {
                config.engine.heritability = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HERDBOOK_ENGINE_WEIGHT_ADJUSTMENT_DAYS") {
            if let Ok(v) = val.parse::<u32>() {
                config.engine.weight_adjustment_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HERDBOOK_ENGINE_MIN_AGE_MALE_MONTHS") {
            if let Ok(v) = val.parse::<u32>() {
                config.engine.min_age_male_months = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HERDBOOK_ENGINE_MIN_AGE_FEMALE_MONTHS") {
            if let Ok(v) = val.parse::<u32>() {
                config.engine.min_age_female_months = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HERDBOOK_ENGINE_MAX_FEMALE_PERCENTAGE_PER_MALE") {
            if let Ok(v) = val.parse::<f64>() {
                config.engine.max_female_percentage_per_male = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HERDBOOK_LOG_FILTER") {
            config.log.filter = Some(val);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user config path: `~/.herdbook/config.toml`.
fn user_config_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".herdbook").join("config.toml"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
