use sqlstamp_core::error::{Result, StampError};
use tracing::{info, warn};

use super::plan::{RenamePlan, RenameStep};

/// Renames applied by a completed run.
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub applied: Vec<RenameStep>,
}

impl RenameReport {
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Applies a rename plan to disk.
///
/// Steps run in order. The first failing rename stops the batch; files
/// renamed before it stay renamed.
pub struct RenameExecutor<F>
where
    F: FnMut(&RenameStep),
{
    on_step: F,
}

impl<F> RenameExecutor<F>
where
    F: FnMut(&RenameStep),
{
    /// `on_step` is called right before each rename is attempted.
    pub fn new(on_step: F) -> Self {
        Self { on_step }
    }

    pub fn apply(&mut self, plan: &RenamePlan) -> Result<RenameReport> {
        let mut report = RenameReport::default();

        for step in plan.steps() {
            (self.on_step)(step);

            let from = plan.dir().join(&step.from);
            let to = plan.dir().join(&step.to);

            if let Err(source) = std::fs::rename(&from, &to) {
                warn!(
                    "Rename of {} failed after {} of {} files",
                    step.from.to_string_lossy(),
                    report.len(),
                    plan.len()
                );
                return Err(StampError::Rename {
                    from: step.from.to_string_lossy().into_owned(),
                    to: step.to.to_string_lossy().into_owned(),
                    source,
                });
            }

            info!(
                "Renamed {} -> {}",
                step.from.to_string_lossy(),
                step.to.to_string_lossy()
            );
            report.applied.push(step.clone());
        }

        Ok(report)
    }
}
