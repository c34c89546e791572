//! Domain logic - pure rules independent of how git is invoked

pub mod branch;
pub mod status;
pub mod step;
pub mod tag;
pub mod timestamp;

pub use branch::{default_milestone_branch, BackupBranchTemplate};
pub use status::RepositoryStatus;
pub use step::{BackupWarning, Disposition, Step, StepOutcome};
pub use tag::{derive_tag_name, is_release_tag};
pub use timestamp::Timestamp;
