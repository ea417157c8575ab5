pub mod migrations;

pub use migrations::{
    MigrationRenamer, RenameExecutor, RenamePlan, RenameReport, RenameStep,
};
