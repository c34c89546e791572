use thiserror::Error;

use crate::domain::Step;

/// Unified error type for git-milestone operations
#[derive(Error, Debug)]
pub enum MilestoneError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown milestone: {0}")]
    UnknownMilestone(String),

    #[error("Working tree has uncommitted changes; commit them first or use --force")]
    DirtyWorkingTree,

    #[error("{step} failed: {reason}")]
    StepFailed { step: Step, reason: String },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-milestone
pub type Result<T> = std::result::Result<T, MilestoneError>;

impl MilestoneError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MilestoneError::Config(msg.into())
    }

    /// Create a step failure for a workflow step
    pub fn step(step: Step, reason: impl Into<String>) -> Self {
        MilestoneError::StepFailed {
            step,
            reason: reason.into(),
        }
    }

    /// Whether the failure happened before any mutating git command ran.
    pub fn is_pre_mutation(&self) -> bool {
        matches!(
            self,
            MilestoneError::Config(_)
                | MilestoneError::UnknownMilestone(_)
                | MilestoneError::DirtyWorkingTree
        )
    }
}
