/// Placeholder for fields whose query failed
pub const UNKNOWN: &str = "unknown";

/// Snapshot of the working copy at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryStatus {
    pub current_branch: String,
    /// HEAD abbreviated to 8 characters, or "unknown"
    pub latest_commit: String,
    pub has_changes: bool,
    pub unpushed_commits: usize,
}

impl RepositoryStatus {
    /// Status reported when every query fails. Unknown state counts as dirty.
    pub fn unknown() -> Self {
        RepositoryStatus {
            current_branch: UNKNOWN.to_string(),
            latest_commit: UNKNOWN.to_string(),
            has_changes: true,
            unpushed_commits: 0,
        }
    }

    pub fn is_on(&self, branch: &str) -> bool {
        self.current_branch == branch
    }
}
