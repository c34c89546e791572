use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use git_milestone::cli::{run_action, Action, WorkflowArgs};
use git_milestone::git::{Gateway, ProcessGit};
use git_milestone::{config, logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-milestone",
    version,
    about = "Commit, tag and back up project milestones in git"
)]
struct Args {
    #[arg(value_enum, help = "Action to perform")]
    action: Action,

    #[arg(short, long, help = "Milestone key (required for backup)")]
    milestone: Option<String>,

    #[arg(short, long, help = "Back up even when the working tree has changes")]
    force: bool,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short = 'C', long, help = "Run as if started in this directory")]
    repo: Option<PathBuf>,

    #[arg(long, help = "Show which backup branches cleanup would delete")]
    dry_run: bool,

    #[arg(short, long, help = "Log every git invocation")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let start_dir = match &args.repo {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    // Discovery only reads .git; configuration errors still win below
    let backend = ProcessGit::discover(&start_dir);
    let base_dir = match &backend {
        Ok(git) => git.workdir().to_path_buf(),
        Err(_) => start_dir.clone(),
    };

    // `-C` applies to a relative --config just as it does to the lookup
    let config_path = match (&args.config, &args.repo) {
        (Some(path), Some(_)) => Some(config::anchor_config_path(path, &start_dir)),
        (path, _) => path.clone(),
    };

    let config = match config::load_config(config_path.as_deref(), &base_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let workflow = WorkflowArgs {
        action: args.action,
        milestone: args.milestone,
        force: args.force,
        dry_run: args.dry_run,
    };

    // Outside a repository every query fails, which the actions already tolerate
    let git = match backend {
        Ok(git) => Gateway::new(git),
        Err(e) => {
            tracing::debug!(error = %e, "no repository discovered");
            Gateway::new(ProcessGit::new(base_dir))
        }
    };

    let code = run_action(&workflow, &config, &git);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
