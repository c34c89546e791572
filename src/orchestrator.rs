//! Milestone backup workflow
//!
//! Drives the gateway through the backup sequence:
//! status check, branch switch, stage, commit, tags, remote push,
//! backup branch, and restoring the target branch.
//!
//! Only branch switching, staging and committing abort the run. Every later
//! step is best-effort: its failure becomes a [BackupWarning] on the report.
//! Nothing is rolled back on abort.

use crate::config::Config;
use crate::domain::{
    derive_tag_name, BackupWarning, Disposition, RepositoryStatus, Step, StepOutcome, Timestamp,
};
use crate::error::{MilestoneError, Result};
use crate::git::{CommandOutput, GitBackend, Gateway};
use crate::inspector::StatusInspector;

/// Output fragments git prints when a commit had nothing staged
const NOTHING_TO_COMMIT: &[&str] = &["nothing to commit", "nothing added to commit"];

/// Output fragment git prints when `checkout -b` targets an existing branch
const BRANCH_EXISTS: &str = "already exists";

/// Result of a successful milestone backup
#[derive(Debug, Clone, PartialEq)]
pub struct BackupReport {
    pub milestone: String,
    pub target_branch: String,
    /// Backup branch, when it was created
    pub backup_branch: Option<String>,
    pub tags_created: Vec<String>,
    pub timestamp: Timestamp,
    /// False when the commit step found nothing to commit
    pub committed: bool,
    pub warnings: Vec<BackupWarning>,
}

impl BackupReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Runs milestone backups against one repository
pub struct MilestoneOrchestrator<'a, B> {
    git: &'a Gateway<B>,
    config: &'a Config,
}

impl<'a, B: GitBackend> MilestoneOrchestrator<'a, B> {
    pub fn new(git: &'a Gateway<B>, config: &'a Config) -> Self {
        MilestoneOrchestrator { git, config }
    }

    /// Create a backup of `key` stamped with the current time.
    pub fn create_backup(&self, key: &str, force: bool) -> Result<BackupReport> {
        self.create_backup_at(key, force, Timestamp::now())
    }

    /// Create a backup of `key` stamped with `timestamp`.
    ///
    /// # Errors
    /// * `UnknownMilestone` - `key` is not configured; no git command runs
    /// * `DirtyWorkingTree` - uncommitted changes and `force` is false; nothing is mutated
    /// * `StepFailed` - switching, staging or committing failed; earlier steps stay applied
    pub fn create_backup_at(
        &self,
        key: &str,
        force: bool,
        timestamp: Timestamp,
    ) -> Result<BackupReport> {
        let milestone = self.config.milestone(key)?;
        let policy = &self.config.backup;
        let template = policy.template()?;

        tracing::info!(milestone = key, %timestamp, "starting milestone backup");

        let status = StatusInspector::new(self.git).status();
        if status.has_changes && !force {
            return Err(MilestoneError::DirtyWorkingTree);
        }

        let target = milestone.target_branch(key);
        let mut report = BackupReport {
            milestone: key.to_string(),
            target_branch: target.clone(),
            backup_branch: None,
            tags_created: Vec::new(),
            timestamp: timestamp.clone(),
            committed: false,
            warnings: Vec::new(),
        };

        report.record(Step::SwitchBranch, &target, self.switch_to(&status, &target))?;

        if status.has_changes {
            let staged = self.git.stage_all().into_outcome();
            report.record(Step::Stage, "working tree", staged)?;
        }

        let commit = self.commit(&milestone.commit_message);
        report.committed = commit == StepOutcome::Completed;
        report.record(Step::Commit, &target, commit)?;

        let tag_message = if milestone.description.is_empty() {
            milestone.commit_message.as_str()
        } else {
            milestone.description.as_str()
        };
        for configured in &milestone.tags {
            let name = derive_tag_name(configured, &timestamp);
            let tagged = self.git.annotated_tag(&name, tag_message).into_outcome();
            if report.record(Step::Tag, &name, tagged)? {
                report.tags_created.push(name);
            }
        }

        if policy.remote_backup {
            let pushed = self.git.push_branch(&policy.remote, &target).into_outcome();
            report.record(Step::PushBranch, &target, pushed)?;

            let pushed = self.git.push_tags(&policy.remote).into_outcome();
            report.record(Step::PushTags, &policy.remote, pushed)?;
        }

        let backup = template.render(&timestamp);
        let created = self.git.create_and_switch(&backup).into_outcome();
        if report.record(Step::CreateBackupBranch, &backup, created)? {
            report.backup_branch = Some(backup.clone());
            if policy.remote_backup {
                let pushed = self.git.push_branch(&policy.remote, &backup).into_outcome();
                report.record(Step::PushBackupBranch, &backup, pushed)?;
            }
        }

        let restored = self.git.switch(&target).into_outcome();
        report.record(Step::RestoreBranch, &target, restored)?;

        tracing::info!(
            milestone = key,
            warnings = report.warnings.len(),
            "milestone backup finished"
        );
        Ok(report)
    }

    /// Make `target` the current branch, creating it when needed.
    fn switch_to(&self, status: &RepositoryStatus, target: &str) -> StepOutcome {
        if status.is_on(target) {
            return StepOutcome::Skipped;
        }

        let created = self.git.create_and_switch(target);
        if created.ok {
            return StepOutcome::Completed;
        }

        if self.branch_exists(target, &created) {
            tracing::debug!(branch = target, "branch exists, switching to it");
            return self.git.switch(target).into_outcome();
        }

        created.into_outcome()
    }

    /// Decide whether a failed `checkout -b` hit an existing branch.
    ///
    /// `rev-parse --verify --quiet` exits 0 for an existing ref and 1 for a
    /// missing one; any other result falls back to git's message text.
    fn branch_exists(&self, target: &str, failed: &CommandOutput) -> bool {
        match self.git.local_branch_check(target).code {
            Some(0) => true,
            Some(1) => false,
            _ => failed.output.contains(BRANCH_EXISTS),
        }
    }

    fn commit(&self, message: &str) -> StepOutcome {
        let out = self.git.commit(message);
        if out.ok {
            return StepOutcome::Completed;
        }

        if self.nothing_staged(&out) {
            tracing::info!("nothing to commit, keeping current HEAD");
            return StepOutcome::Skipped;
        }

        out.into_outcome()
    }

    /// `diff --cached --quiet` exits 0 when the index matches HEAD and 1 when
    /// changes are staged; message matching is the fallback.
    fn nothing_staged(&self, failed: &CommandOutput) -> bool {
        match self.git.staged_changes_check().code {
            Some(0) => true,
            Some(1) => false,
            _ => NOTHING_TO_COMMIT
                .iter()
                .any(|fragment| failed.output.contains(fragment)),
        }
    }
}

impl BackupReport {
    /// Apply the step decision table; `Ok(true)` when the step succeeded.
    fn record(&mut self, step: Step, target: &str, outcome: StepOutcome) -> Result<bool> {
        match outcome.settle(step, target) {
            Disposition::Proceed => {
                tracing::debug!(%step, subject = target, "step done");
                Ok(true)
            }
            Disposition::Warn(warning) => {
                tracing::warn!("{}", warning);
                self.warnings.push(warning);
                Ok(false)
            }
            Disposition::Abort(err) => {
                tracing::error!(%step, subject = target, "{}", err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackupPolicy, MilestoneDefinition};
    use crate::git::ScriptedBackend;

    fn config(remote_backup: bool) -> Config {
        let mut config = Config {
            milestones: Default::default(),
            backup: BackupPolicy {
                remote_backup,
                ..BackupPolicy::default()
            },
        };
        config.milestones.insert(
            "beta".to_string(),
            MilestoneDefinition {
                description: String::new(),
                branch: None,
                commit_message: "Beta".to_string(),
                tags: vec!["snapshot".to_string()],
            },
        );
        config
    }

    fn ts() -> Timestamp {
        Timestamp::parse("20240101_120000").unwrap()
    }

    #[test]
    fn test_already_on_target_skips_switch() {
        let git = Gateway::new(
            ScriptedBackend::new().respond(&["branch", "--show-current"], true, "milestone-beta"),
        );
        let config = config(false);

        let report = MilestoneOrchestrator::new(&git, &config)
            .create_backup_at("beta", false, ts())
            .unwrap();

        assert_eq!(report.target_branch, "milestone-beta");
        assert!(!git
            .backend()
            .calls()
            .contains(&vec!["checkout".to_string(), "-b".to_string(), "milestone-beta".to_string()]));
    }

    #[test]
    fn test_empty_description_tags_with_commit_message() {
        let git = Gateway::new(ScriptedBackend::new());
        let config = config(false);

        MilestoneOrchestrator::new(&git, &config)
            .create_backup_at("beta", false, ts())
            .unwrap();

        assert!(git.backend().calls().contains(&vec![
            "tag".to_string(),
            "-a".to_string(),
            "snapshot-20240101_120000".to_string(),
            "-m".to_string(),
            "Beta".to_string(),
        ]));
    }

    #[test]
    fn test_clean_tree_does_not_stage() {
        let git = Gateway::new(ScriptedBackend::new());
        let config = config(false);

        MilestoneOrchestrator::new(&git, &config)
            .create_backup_at("beta", false, ts())
            .unwrap();

        assert!(!git.backend().calls().iter().any(|c| c[0] == "add"));
    }

    #[test]
    fn test_backup_branch_failure_is_warning_and_still_restores() {
        let git = Gateway::new(ScriptedBackend::new().respond(
            &["checkout", "-b", "backup/auto-20240101_120000"],
            false,
            "fatal: cannot lock ref",
        ));
        let config = config(true);

        let report = MilestoneOrchestrator::new(&git, &config)
            .create_backup_at("beta", false, ts())
            .unwrap();

        assert_eq!(report.backup_branch, None);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].step, Step::CreateBackupBranch);

        let calls = git.backend().calls();
        assert_eq!(calls.last().unwrap(), &vec!["checkout", "milestone-beta"]);
        assert!(!calls.contains(&vec![
            "push".to_string(),
            "origin".to_string(),
            "backup/auto-20240101_120000".to_string(),
        ]));
    }
}
