//! Working-copy status snapshot.

use crate::domain::status::UNKNOWN;
use crate::domain::RepositoryStatus;
use crate::git::{GitBackend, Gateway};

const SHORT_HASH_LEN: usize = 8;

/// Builds [RepositoryStatus] snapshots from several tolerant git queries
pub struct StatusInspector<'a, B> {
    git: &'a Gateway<B>,
}

impl<'a, B: GitBackend> StatusInspector<'a, B> {
    pub fn new(git: &'a Gateway<B>) -> Self {
        StatusInspector { git }
    }

    /// Capture the current status.
    ///
    /// No query failure is fatal: branch and commit default to "unknown",
    /// an unreadable working tree counts as dirty, and a missing upstream
    /// counts as zero unpushed commits.
    pub fn status(&self) -> RepositoryStatus {
        let branch = self.git.current_branch();
        let current_branch = if branch.ok {
            branch.output
        } else {
            UNKNOWN.to_string()
        };

        let head = self.git.head_commit();
        let latest_commit = if head.ok {
            head.output.chars().take(SHORT_HASH_LEN).collect()
        } else {
            UNKNOWN.to_string()
        };

        let porcelain = self.git.porcelain_status();
        let has_changes = !porcelain.ok || !porcelain.output.is_empty();

        let log = self.git.unpushed_log();
        let unpushed_commits = if log.ok { log.lines().count() } else { 0 };

        let status = RepositoryStatus {
            current_branch,
            latest_commit,
            has_changes,
            unpushed_commits,
        };
        tracing::debug!(?status, "inspected working copy");
        status
    }
}
