use std::fmt;

use crate::error::MilestoneError;

/// A git-mutating step of the milestone workflow or the retention cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    SwitchBranch,
    Stage,
    Commit,
    Tag,
    PushBranch,
    PushTags,
    CreateBackupBranch,
    PushBackupBranch,
    RestoreBranch,
    ListBackupBranches,
    DeleteBackupBranch,
}

impl Step {
    /// Critical steps abort the workflow on failure; every other step is best-effort.
    pub fn is_critical(self) -> bool {
        matches!(self, Step::SwitchBranch | Step::Stage | Step::Commit)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::SwitchBranch => "switch branch",
            Step::Stage => "stage changes",
            Step::Commit => "commit",
            Step::Tag => "create tag",
            Step::PushBranch => "push branch",
            Step::PushTags => "push tags",
            Step::CreateBackupBranch => "create backup branch",
            Step::PushBackupBranch => "push backup branch",
            Step::RestoreBranch => "restore branch",
            Step::ListBackupBranches => "list backup branches",
            Step::DeleteBackupBranch => "delete backup branch",
        };
        f.write_str(name)
    }
}

/// What happened when a step ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    /// The step had nothing to do (already on the branch, nothing to commit)
    Skipped,
    Failed(String),
}

/// A best-effort step that failed without aborting the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupWarning {
    pub step: Step,
    /// Branch or tag the step acted on
    pub target: String,
    pub reason: String,
}

impl fmt::Display for BackupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' failed: {}", self.step, self.target, self.reason)
    }
}

/// How the workflow continues after a step
#[derive(Debug)]
pub enum Disposition {
    Proceed,
    Warn(BackupWarning),
    Abort(MilestoneError),
}

impl StepOutcome {
    /// Apply the fatal/best-effort decision table to this outcome.
    pub fn settle(self, step: Step, target: &str) -> Disposition {
        match self {
            StepOutcome::Completed | StepOutcome::Skipped => Disposition::Proceed,
            StepOutcome::Failed(reason) if step.is_critical() => {
                Disposition::Abort(MilestoneError::step(step, reason))
            }
            StepOutcome::Failed(reason) => Disposition::Warn(BackupWarning {
                step,
                target: target.to_string(),
                reason,
            }),
        }
    }
}
