use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file path. Relative paths resolve against the working
    /// directory of the embedding application.
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from("herdbook.db"))
    }
}
