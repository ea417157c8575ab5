mod renamer;

pub use renamer::{ClockSource, RenamerConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Result, StampError};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sqlstamp.toml";

/// Root configuration for sqlstamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StampConfig {
    /// Renamer configuration.
    #[serde(default)]
    pub renamer: RenamerConfig,
}

impl StampConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| StampError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| StampError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration, falling back to defaults when `path` is absent.
    ///
    /// A missing file is only an error when `required` is set, which is the
    /// case when the user named the file explicitly.
    pub fn load(path: impl AsRef<Path>, required: bool) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        if required {
            return Err(StampError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        debug!("No configuration at {}, using defaults", path.display());
        Ok(Self::default())
    }
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
