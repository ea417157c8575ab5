use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Renamer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamerConfig {
    /// Directory holding the migration files.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// File extension to match, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Clock used for the base timestamp.
    #[serde(default)]
    pub clock: ClockSource,

    /// Refuse to run when a rename would land on an existing file.
    #[serde(default)]
    pub check_collisions: bool,
}

impl Default for RenamerConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extension: default_extension(),
            clock: ClockSource::default(),
            check_collisions: false,
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("supabase/migrations")
}

fn default_extension() -> String {
    "sql".to_string()
}

/// Clock the base timestamp is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockSource {
    /// Local wall-clock time.
    #[default]
    Local,

    /// Coordinated universal time.
    Utc,
}
