//! Error types for the Herdbook workspace.
//!
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

mod config_error;
mod mating_error;
mod storage_error;

pub use config_error::{ConfigError, ConfigResult};
pub use mating_error::{MatingError, MatingResult};
pub use storage_error::{StorageError, StorageResult};
