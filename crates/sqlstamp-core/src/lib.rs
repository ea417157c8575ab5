pub mod config;
pub mod error;
pub mod naming;

pub use config::{ClockSource, RenamerConfig, StampConfig};
pub use error::{Result, StampError};
pub use naming::{stem_suffix, BaseTimestamp, MigrationFile};
