use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    pub filter: Option<String>,
}

impl LogConfig {
    pub fn filter(&self) -> &str {
        self.filter.as_deref().unwrap_or("info")
    }
}
