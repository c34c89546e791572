//! Action dispatch
//!
//! Maps a parsed command line onto the orchestrator, cleaner and inspector,
//! renders their results, and decides the process exit code. Kept separate
//! from `main` so it can be driven without clap or a real repository.

use crate::cleaner::RetentionCleaner;
use crate::config::Config;
use crate::error::MilestoneError;
use crate::git::{GitBackend, Gateway};
use crate::inspector::StatusInspector;
use crate::orchestrator::MilestoneOrchestrator;
use crate::ui;

/// What the invocation should do
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Action {
    /// Commit, tag and back up a milestone
    Backup,
    /// List configured milestones
    List,
    /// Delete old remote backup branches
    Cleanup,
    /// Show the working copy status
    Status,
}

/// Arguments for one action
///
/// Mirrors the CLI flags without depending on clap's parser.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    pub action: Action,

    /// Milestone key, required for `backup`
    pub milestone: Option<String>,

    /// Back up even when the working tree is dirty
    pub force: bool,

    /// Preview `cleanup` without deleting
    pub dry_run: bool,
}

impl WorkflowArgs {
    pub fn new(action: Action) -> Self {
        WorkflowArgs {
            action,
            milestone: None,
            force: false,
            dry_run: false,
        }
    }
}

/// Run one action and return the process exit code.
///
/// `backup` returns 1 on any failure; `list`, `cleanup` and `status` always return 0.
pub fn run_action<B: GitBackend>(args: &WorkflowArgs, config: &Config, git: &Gateway<B>) -> i32 {
    match args.action {
        Action::Backup => run_backup(args, config, git),
        Action::List => {
            ui::display_block(&ui::format_milestones(config));
            0
        }
        Action::Cleanup => {
            run_cleanup(args, config, git);
            0
        }
        Action::Status => {
            let status = StatusInspector::new(git).status();
            ui::display_block(&ui::format_status(&status));
            0
        }
    }
}

fn run_backup<B: GitBackend>(args: &WorkflowArgs, config: &Config, git: &Gateway<B>) -> i32 {
    let key = match args.milestone.as_deref() {
        Some(key) => key,
        None => {
            ui::display_error("Specify a milestone with --milestone");
            ui::display_block(&ui::format_milestones(config));
            return 1;
        }
    };

    if let Ok(milestone) = config.milestone(key) {
        ui::display_status(&format!("Creating milestone backup: {}", milestone.description));
    }

    match MilestoneOrchestrator::new(git, config).create_backup(key, args.force) {
        Ok(report) => {
            for warning in &report.warnings {
                ui::display_warning(warning);
            }
            ui::display_success(&ui::format_backup_report(&report));
            0
        }
        Err(MilestoneError::UnknownMilestone(key)) => {
            ui::display_error(&format!("Milestone '{}' is not configured", key));
            ui::display_block(&ui::format_milestones(config));
            1
        }
        Err(e) => {
            ui::display_error(&ui::format_backup_failure(&e));
            1
        }
    }
}

fn run_cleanup<B: GitBackend>(args: &WorkflowArgs, config: &Config, git: &Gateway<B>) {
    let cleaner = RetentionCleaner::new(git, &config.backup);
    let result = if args.dry_run {
        cleaner.preview()
    } else {
        cleaner.cleanup()
    };

    match result {
        Ok(report) => ui::display_block(&ui::format_cleanup_report(
            &report,
            config.backup.cleanup.keep_last,
        )),
        Err(e) => ui::display_error(&e.to_string()),
    }
}
