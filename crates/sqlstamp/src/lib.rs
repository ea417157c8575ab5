//! sqlstamp - resequence timestamp-prefixed SQL migrations.
//!
//! Renames every `.sql` file in a migrations directory to
//! `{timestamp}_{suffix}.sql`, with timestamps counting up from the current
//! time in filename order.

pub mod cli;

pub use sqlstamp_core::config::{RenamerConfig, StampConfig, DEFAULT_CONFIG_FILE};
pub use sqlstamp_core::{BaseTimestamp, StampError};
pub use sqlstamp_runtime::migrations::{MigrationRenamer, RenameReport, RenameStep};
