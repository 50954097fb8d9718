/// Herdbook system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Animal status value that qualifies an animal for breeding workflows.
pub const ANIMAL_STATUS_ACTIVE: &str = "active";

/// Animal categories that mark a male as a breeding sire. These are wire
/// values carried over from existing herd data and must not be translated.
pub const SIRE_CATEGORIES: [&str; 2] = ["reprodutor", "marrão"];

/// Days of gestation used to predict a birth date from a coverage date.
pub const GESTATION_DAYS: i64 = 152;

/// Weight applied to the inbreeding percentage inside the selection index.
pub const INDEX_INBREEDING_PENALTY: f64 = 0.01;

/// Weight applied to the predicted inbreeding inside the pairing objective.
pub const OBJECTIVE_INBREEDING_PENALTY: f64 = 0.5;

/// Default heritability coefficient for growth traits.
pub const DEFAULT_HERITABILITY: f64 = 0.3;

/// Default weight-adjustment horizon in days.
pub const DEFAULT_ADJUSTMENT_DAYS: u32 = 60;

/// Default minimum breeding age for males, in months.
pub const DEFAULT_MIN_AGE_MALE_MONTHS: u32 = 6;

/// Default minimum breeding age for females, in months.
pub const DEFAULT_MIN_AGE_FEMALE_MONTHS: u32 = 8;

/// Default share of the dam pool a single sire may cover, as a percentage.
pub const DEFAULT_MAX_FEMALE_PERCENTAGE_PER_MALE: f64 = 50.0;

/// Default dam weight (kg) recorded on conversion when no weighing exists.
pub const DEFAULT_DAM_WEIGHT_KG: f64 = 50.0;

/// Default dam body condition score (1-5) recorded on conversion.
pub const DEFAULT_BODY_CONDITION_SCORE: u32 = 3;
