//! Layered configuration: compiled defaults, user file, project file, and
//! `HERDBOOK_*` environment overrides.

mod engine_config;
mod herdbook_config;
mod log_config;
mod storage_config;

pub use engine_config::EngineConfig;
pub use herdbook_config::HerdbookConfig;
pub use log_config::LogConfig;
pub use storage_config::StorageConfig;
