//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing lives in the parent module so
//! these functions stay testable.

use console::style;

use crate::cleaner::CleanupReport;
use crate::config::Config;
use crate::domain::RepositoryStatus;
use crate::error::MilestoneError;
use crate::orchestrator::BackupReport;

/// Format the `status` action output.
pub fn format_status(status: &RepositoryStatus) -> String {
    let tree = if status.has_changes {
        style("has changes").yellow()
    } else {
        style("clean").green()
    };
    format!(
        "{}\n  - Branch: {}\n  - Latest commit: {}\n  - Working tree: {}\n  - Unpushed commits: {}",
        style("Repository status:").bold(),
        status.current_branch,
        status.latest_commit,
        tree,
        status.unpushed_commits
    )
}

/// Format the configured milestones, one per line.
pub fn format_milestones(config: &Config) -> String {
    if config.milestones.is_empty() {
        return "No milestones configured".to_string();
    }

    let mut out = style("Available milestones:").bold().to_string();
    for (key, milestone) in &config.milestones {
        out.push_str(&format!("\n  - {}: {}", style(key).cyan(), milestone.description));
        out.push_str(&format!(
            "\n      branch: {}",
            milestone.target_branch(key)
        ));
        if !milestone.tags.is_empty() {
            out.push_str(&format!("\n      tags: {}", milestone.tags.join(", ")));
        }
    }
    out
}

/// Summarize a finished backup.
pub fn format_backup_report(report: &BackupReport) -> String {
    let mut lines = vec![
        format!("Milestone backup complete: {}", report.milestone),
        format!("  - Branch: {}", report.target_branch),
        format!(
            "  - Backup branch: {}",
            report.backup_branch.as_deref().unwrap_or("(not created)")
        ),
        format!(
            "  - Tags: {}",
            if report.tags_created.is_empty() {
                "(none)".to_string()
            } else {
                report.tags_created.join(", ")
            }
        ),
        format!("  - Timestamp: {}", report.timestamp),
    ];
    if !report.committed {
        lines.push("  - Commit: nothing to commit, HEAD unchanged".to_string());
    }
    lines.join("\n")
}

/// Describe a backup that stopped, noting when the repository was never touched.
pub fn format_backup_failure(err: &MilestoneError) -> String {
    if err.is_pre_mutation() {
        format!("{} (no changes were made)", err)
    } else {
        format!("{} (backup stopped partway; check the current branch)", err)
    }
}

/// Summarize a cleanup run.
pub fn format_cleanup_report(report: &CleanupReport, keep_last: usize) -> String {
    if !report.enabled {
        return "Backup cleanup is disabled".to_string();
    }

    let verb = if report.dry_run { "Would delete" } else { "Deleted" };
    let mut lines: Vec<String> = report
        .deleted
        .iter()
        .map(|branch| format!("  {} {}", verb, branch))
        .collect();
    for (branch, reason) in &report.failed {
        lines.push(format!("  Failed to delete {}: {}", branch, reason));
    }
    for branch in &report.skipped {
        lines.push(format!("  Ignored {} (no timestamp in name)", branch));
    }
    lines.push(format!(
        "Cleanup complete: kept the newest {} of {} backups (limit {})",
        report.kept.len(),
        report.found.len(),
        keep_last
    ));
    lines.join("\n")
}
