use serde::{Deserialize, Serialize};

use crate::constants;

/// Engine defaults applied when a caller does not supply a parameter.
///
/// Fields are optional so that file layers can be merged; the same-named
/// accessor methods resolve the effective value.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub heritability: Option<f64>,
    pub weight_adjustment_days: Option<u32>,
    pub min_age_male_months: Option<u32>,
    pub min_age_female_months: Option<u32>,
    pub max_female_percentage_per_male: Option<f64>,
    pub default_dam_weight: Option<f64>,
    pub default_body_condition_score: Option<u32>,
}

impl EngineConfig {
    pub fn heritability(&self) -> f64 {
        self.heritability.unwrap_or(constants::DEFAULT_HERITABILITY)
    }

    pub fn weight_adjustment_days(&self) -> u32 {
        self.weight_adjustment_days
            .unwrap_or(constants::DEFAULT_ADJUSTMENT_DAYS)
    }

    pub fn min_age_male_months(&self) -> u32 {
        self.min_age_male_months
            .unwrap_or(constants::DEFAULT_MIN_AGE_MALE_MONTHS)
    }

    pub fn min_age_female_months(&self) -> u32 {
        self.min_age_female_months
            .unwrap_or(constants::DEFAULT_MIN_AGE_FEMALE_MONTHS)
    }

    pub fn max_female_percentage_per_male(&self) -> f64 {
        self.max_female_percentage_per_male
            .unwrap_or(constants::DEFAULT_MAX_FEMALE_PERCENTAGE_PER_MALE)
    }

    pub fn default_dam_weight(&self) -> f64 {
        self.default_dam_weight
            .unwrap_or(constants::DEFAULT_DAM_WEIGHT_KG)
    }

    pub fn default_body_condition_score(&self) -> u32 {
        self.default_body_condition_score
            .unwrap_or(constants::DEFAULT_BODY_CONDITION_SCORE)
    }
}
