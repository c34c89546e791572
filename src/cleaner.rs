//! Retention of remote backup branches.

use crate::config::BackupPolicy;
use crate::domain::{BackupBranchTemplate, Step, Timestamp};
use crate::error::{MilestoneError, Result};
use crate::git::{GitBackend, Gateway};

/// What a cleanup run found and did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CleanupReport {
    pub enabled: bool,
    pub dry_run: bool,
    /// Backup branches found on the remote, oldest first
    pub found: Vec<String>,
    pub kept: Vec<String>,
    pub deleted: Vec<String>,
    pub failed: Vec<(String, String)>,
    /// Names under the backup prefix that carry no parseable timestamp
    pub skipped: Vec<String>,
}

/// Branches to delete so that only the newest `keep_last` remain.
///
/// `branches` must be ordered oldest first.
pub fn plan_deletions(branches: &[String], keep_last: usize) -> &[String] {
    let excess = branches.len().saturating_sub(keep_last);
    &branches[..excess]
}

/// Strip `remote/` from `branch -r` output lines, ignoring symbolic refs.
pub fn parse_remote_listing<'a>(listing: &'a str, remote: &str) -> Vec<&'a str> {
    let decoration = format!("{}/", remote);
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(" -> "))
        .map(|line| line.strip_prefix(decoration.as_str()).unwrap_or(line))
        .collect()
}

/// Deletes remote backup branches beyond the retention count
pub struct RetentionCleaner<'a, B> {
    git: &'a Gateway<B>,
    policy: &'a BackupPolicy,
}

impl<'a, B: GitBackend> RetentionCleaner<'a, B> {
    pub fn new(git: &'a Gateway<B>, policy: &'a BackupPolicy) -> Self {
        RetentionCleaner { git, policy }
    }

    pub fn cleanup(&self) -> Result<CleanupReport> {
        self.run(false)
    }

    /// Report what `cleanup` would delete without touching the remote
    pub fn preview(&self) -> Result<CleanupReport> {
        self.run(true)
    }

    fn run(&self, dry_run: bool) -> Result<CleanupReport> {
        let mut report = CleanupReport {
            dry_run,
            ..CleanupReport::default()
        };

        if !self.policy.cleanup.enabled {
            tracing::info!("backup cleanup disabled");
            return Ok(report);
        }
        report.enabled = true;

        let template = self.policy.template()?;
        let (found, skipped) = self.list_backups(&template)?;
        report.skipped = skipped;

        let doomed = plan_deletions(&found, self.policy.cleanup.keep_last);
        report.kept = found[doomed.len()..].to_vec();

        for branch in doomed {
            if dry_run {
                report.deleted.push(branch.clone());
                continue;
            }

            let out = self.git.delete_remote_branch(&self.policy.remote, branch);
            if out.ok {
                tracing::info!(branch = branch.as_str(), "deleted old backup branch");
                report.deleted.push(branch.clone());
            } else {
                tracing::warn!(branch = branch.as_str(), error = %out.output, "could not delete backup branch");
                report.failed.push((branch.clone(), out.output));
            }
        }

        report.found = found;
        Ok(report)
    }

    /// Remote backup branches ordered by embedded timestamp, plus names that have none
    fn list_backups(&self, template: &BackupBranchTemplate) -> Result<(Vec<String>, Vec<String>)> {
        let remote = &self.policy.remote;
        let out = self.git.list_remote_branches(&template.remote_glob(remote));
        if !out.ok {
            return Err(MilestoneError::step(Step::ListBackupBranches, out.output));
        }

        let mut dated: Vec<(Timestamp, String)> = Vec::new();
        let mut skipped = Vec::new();
        for name in parse_remote_listing(&out.output, remote) {
            match template.timestamp_of(name) {
                Some(ts) => dated.push((ts, name.to_string())),
                None => skipped.push(name.to_string()),
            }
        }

        // stable: equal timestamps keep listing order
        dated.sort_by(|a, b| a.0.cmp(&b.0));
        Ok((dated.into_iter().map(|(_, name)| name).collect(), skipped))
    }
}
