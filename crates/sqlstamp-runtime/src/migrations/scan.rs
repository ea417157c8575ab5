use sqlstamp_core::error::{Result, StampError};
use sqlstamp_core::naming::MigrationFile;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;
use tracing::debug;

/// Load migration files from a directory.
///
/// Only entries directly inside `dir` whose name ends in `.{extension}` are
/// returned, sorted by filename. A bare `.sql` counts.
pub fn load_migrations_from_dir(dir: &Path, extension: &str) -> Result<Vec<MigrationFile>> {
    ensure_dir(dir)?;

    let mut migrations = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(file) = MigrationFile::from_path(&entry.path(), extension)? {
            migrations.push(file);
        }
    }

    migrations.sort_by(|a, b| a.original_name.cmp(&b.original_name));

    debug!("Found {} migrations in {}", migrations.len(), dir.display());
    Ok(migrations)
}

/// Names of every entry in `dir`, migration or not.
pub fn entry_names(dir: &Path) -> Result<HashSet<OsString>> {
    let mut names = HashSet::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        names.insert(entry.file_name());
    }
    Ok(names)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(StampError::DirectoryNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(StampError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}
