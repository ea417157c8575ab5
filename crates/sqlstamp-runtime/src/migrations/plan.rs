use sqlstamp_core::error::{Result, StampError};
use sqlstamp_core::naming::{BaseTimestamp, MigrationFile};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One rename within a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    /// Position in the sorted listing.
    pub index: usize,
    /// Current filename.
    pub from: OsString,
    /// Filename after the rename.
    pub to: OsString,
}

/// Ordered renames for a single run over one directory.
#[derive(Debug, Clone)]
pub struct RenamePlan {
    dir: PathBuf,
    base: BaseTimestamp,
    steps: Vec<RenameStep>,
}

impl RenamePlan {
    /// Assign `base + index` to each file, in the order given.
    pub fn build(
        dir: impl Into<PathBuf>,
        files: &[MigrationFile],
        base: BaseTimestamp,
        extension: &str,
    ) -> Result<Self> {
        let steps = files
            .iter()
            .enumerate()
            .map(|(index, file)| {
                let timestamp = base.offset(index)?;
                Ok(RenameStep {
                    index,
                    from: file.original_name.clone(),
                    to: file.new_name(timestamp, extension),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dir: dir.into(),
            base,
            steps,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn base(&self) -> BaseTimestamp {
        self.base
    }

    pub fn steps(&self) -> &[RenameStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Replay the plan against the directory's current entry names.
    ///
    /// Fails on the first step whose target is still occupied when its turn
    /// comes. A step that keeps its own name is fine.
    pub fn check_collisions(&self, existing: &HashSet<OsString>) -> Result<()> {
        let mut present = existing.clone();

        for step in &self.steps {
            present.remove(&step.from);
            if !present.insert(step.to.clone()) {
                return Err(StampError::Collision {
                    from: step.from.to_string_lossy().into_owned(),
                    to: step.to.to_string_lossy().into_owned(),
                });
            }
        }

        debug!("No collisions across {} renames", self.steps.len());
        Ok(())
    }
}
