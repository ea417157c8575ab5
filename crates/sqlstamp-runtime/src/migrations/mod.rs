//! Resequencing of migration files on disk.
//!
//! A run scans one directory, plans a `{base + index}_{suffix}.sql` name for
//! every migration in filename order, and renames them in place.

mod executor;
mod plan;
mod scan;

pub use executor::{RenameExecutor, RenameReport};
pub use plan::{RenamePlan, RenameStep};
pub use scan::{entry_names, load_migrations_from_dir};

use sqlstamp_core::config::RenamerConfig;
use sqlstamp_core::error::Result;
use sqlstamp_core::naming::BaseTimestamp;
use tracing::debug;

/// Renames the migrations of one configured directory.
pub struct MigrationRenamer {
    config: RenamerConfig,
}

impl MigrationRenamer {
    pub fn new(config: RenamerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenamerConfig {
        &self.config
    }

    /// Scan the directory and plan new names starting at `base`.
    ///
    /// Fails before touching anything if the directory is missing, or if the
    /// collision guard is enabled and a rename would replace a file.
    pub fn plan(&self, base: BaseTimestamp) -> Result<RenamePlan> {
        let dir = &self.config.dir;
        let files = load_migrations_from_dir(dir, &self.config.extension)?;
        let plan = RenamePlan::build(dir, &files, base, &self.config.extension)?;
        debug!("Planned {} renames from base {}", plan.len(), base);

        if self.config.check_collisions {
            plan.check_collisions(&entry_names(dir)?)?;
        } else {
            debug!("Collision check disabled, existing targets will be replaced");
        }

        Ok(plan)
    }

    /// Plan from the configured clock and apply every rename.
    pub fn run<F>(&self, on_step: F) -> Result<RenameReport>
    where
        F: FnMut(&RenameStep),
    {
        let base = BaseTimestamp::now(self.config.clock)?;
        self.run_from(base, on_step)
    }

    /// Plan from an explicit base timestamp and apply every rename.
    pub fn run_from<F>(&self, base: BaseTimestamp, on_step: F) -> Result<RenameReport>
    where
        F: FnMut(&RenameStep),
    {
        let plan = self.plan(base)?;
        RenameExecutor::new(on_step).apply(&plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlstamp_core::error::StampError;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn renamer(dir: &Path) -> MigrationRenamer {
        MigrationRenamer::new(RenamerConfig {
            dir: dir.to_path_buf(),
            ..Default::default()
        })
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_run_renames_sorted_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b-two.sql"), "").unwrap();
        fs::write(dir.path().join("a-one.sql"), "").unwrap();
        fs::write(dir.path().join("001-Add Users Table.sql"), "").unwrap();
        fs::write(dir.path().join("initsetup.sql"), "").unwrap();

        let report = renamer(dir.path())
            .run_from(BaseTimestamp::new(20250101120000), |_| {})
            .unwrap();

        assert_eq!(report.len(), 4);
        assert_eq!(
            listing(dir.path()),
            [
                "20250101120000_add_users_table.sql",
                "20250101120001_one.sql",
                "20250101120002_two.sql",
                "20250101120003_initsetup.sql",
            ]
        );
    }

    #[test]
    fn test_run_renames_bare_extension_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".sql"), "").unwrap();
        fs::write(dir.path().join("a-one.sql"), "").unwrap();

        renamer(dir.path())
            .run_from(BaseTimestamp::new(20250101120000), |_| {})
            .unwrap();

        assert_eq!(
            listing(dir.path()),
            ["20250101120000_.sql.sql", "20250101120001_one.sql"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_renames_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"001-Bad \xFF.sql")), "x").unwrap();

        let report = renamer(dir.path())
            .run_from(BaseTimestamp::new(100), |_| {})
            .unwrap();

        let expected = b"100_bad_\xFF.sql".to_vec();
        assert_eq!(report.applied[0].to.clone().into_vec(), expected);
        assert_eq!(
            fs::read_to_string(dir.path().join(OsStr::from_bytes(&expected))).unwrap(),
            "x"
        );
    }

    #[test]
    fn test_run_with_clock() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a-one.sql"), "").unwrap();
        fs::write(dir.path().join("b-two.sql"), "").unwrap();

        let report = renamer(dir.path()).run(|_| {}).unwrap();

        let stamps: Vec<u64> = report
            .applied
            .iter()
            .map(|s| {
                let to = s.to.to_str().unwrap();
                let (digits, _) = to.split_once('_').unwrap();
                assert_eq!(digits.len(), 14);
                digits.parse().unwrap()
            })
            .collect();
        assert_eq!(stamps[1], stamps[0] + 1);
        assert!(report.applied[0].to.to_str().unwrap().ends_with("_one.sql"));
    }

    #[test]
    fn test_run_empty_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "").unwrap();

        let report = renamer(dir.path())
            .run_from(BaseTimestamp::new(1), |_| {})
            .unwrap();
        assert!(report.is_empty());
        assert_eq!(listing(dir.path()), ["README.md"]);
    }

    #[test]
    fn test_run_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("supabase/migrations");

        let err = renamer(&missing).run(|_| {}).unwrap_err();
        assert!(matches!(err, StampError::DirectoryNotFound(_)));
        assert!(listing(dir.path()).is_empty());
    }

    #[test]
    fn test_run_is_not_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a-one.sql"), "").unwrap();

        let renamer = renamer(dir.path());
        renamer
            .run_from(BaseTimestamp::new(20250101000000), |_| {})
            .unwrap();
        assert_eq!(listing(dir.path()), ["20250101000000_one.sql"]);

        // Same base, yet the second pass renames again: the old prefix has
        // no dash, so it becomes part of the suffix.
        renamer
            .run_from(BaseTimestamp::new(20250101000000), |_| {})
            .unwrap();
        assert_eq!(
            listing(dir.path()),
            ["20250101000000_20250101000000_one.sql"]
        );
    }

    #[test]
    fn test_collision_guard_blocks_before_any_rename() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("0-a.sql"), "first").unwrap();
        fs::write(dir.path().join("100_a.sql"), "second").unwrap();

        let renamer = MigrationRenamer::new(RenamerConfig {
            dir: dir.path().to_path_buf(),
            check_collisions: true,
            ..Default::default()
        });
        let mut steps = 0;
        let err = renamer
            .run_from(BaseTimestamp::new(100), |_| steps += 1)
            .unwrap_err();

        assert!(matches!(err, StampError::Collision { .. }));
        assert_eq!(steps, 0);
        assert_eq!(listing(dir.path()), ["0-a.sql", "100_a.sql"]);
    }

    #[test]
    fn test_collision_guard_allows_clean_run() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a-one.sql"), "").unwrap();

        let renamer = MigrationRenamer::new(RenamerConfig {
            dir: dir.path().to_path_buf(),
            check_collisions: true,
            ..Default::default()
        });
        let report = renamer.run_from(BaseTimestamp::new(100), |_| {}).unwrap();
        assert_eq!(report.applied[0].to, "100_one.sql");
    }
}
