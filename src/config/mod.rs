//! Parser configuration.
//!
//! Handles loading and saving parser options from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Options controlling how an IEPG stream is parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParserConfig {
    /// Upper bound on the size of the header block, separator included.
    #[serde(default = "default_max_header_bytes")]
    pub max_header_bytes: usize,
    /// Fail the parse when the start or end time cannot be derived.
    #[serde(default)]
    pub strict_times: bool,
}

fn default_max_header_bytes() -> usize {
    64 * 1024
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_header_bytes: default_max_header_bytes(),
            strict_times: false,
        }
    }
}

impl ParserConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Configuration manager for loading/saving parser config.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Get the config file path.
    pub fn get_config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// Load configuration from file, falling back to defaults.
    pub fn load(&self) -> ParserConfig {
        self.try_load().unwrap_or_default()
    }

    fn try_load(&self) -> Option<ParserConfig> {
        if !self.config_path.exists() {
            return None;
        }

        let content = fs::read_to_string(&self.config_path).ok()?;
        match ParserConfig::from_json_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %self.config_path.display(), error = %e, "ignoring unreadable parser config");
                None
            }
        }
    }

    /// Save configuration to file.
    pub fn save(&self, config: &ParserConfig) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        fs::write(&self.config_path, json)
    }
}
