//! Git command abstraction layer
//!
//! This module isolates the rest of the crate from how git is invoked.
//!
//! # Overview
//!
//! The primary abstraction is the [GitBackend] trait: run one git command
//! and report what happened, never failing. Implementations:
//!
//! - [repository::ProcessGit]: runs the `git` binary in an explicit work directory
//! - [mock::ScriptedBackend]: answers from scripted responses and records every call
//!
//! [Gateway] layers typed helpers for each command the workflow needs on top
//! of any backend, so callers never assemble argument vectors themselves.
//!
//! ```rust
//! # use git_milestone::git::{Gateway, ScriptedBackend};
//! let backend = ScriptedBackend::new().respond(&["branch", "--show-current"], true, "main");
//! let git = Gateway::new(backend);
//! assert_eq!(git.current_branch().output, "main");
//! ```

pub mod mock;
pub mod repository;

pub use mock::ScriptedBackend;
pub use repository::ProcessGit;

use crate::domain::StepOutcome;

/// Result of one git invocation.
///
/// Failures of every kind (non-zero exit, spawn error) are represented here
/// rather than as `Err`, so each step's result can be inspected as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub ok: bool,
    /// Trimmed stdout on success; stderr (or stdout when stderr is empty) on failure
    pub output: String,
    /// Exit code, when the process ran to completion
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(output: impl Into<String>) -> Self {
        CommandOutput {
            ok: true,
            output: output.into(),
            code: Some(0),
        }
    }

    pub fn failure(code: Option<i32>, output: impl Into<String>) -> Self {
        CommandOutput {
            ok: false,
            output: output.into(),
            code,
        }
    }

    /// Non-empty output lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.output.lines().map(str::trim).filter(|l| !l.is_empty())
    }

    /// View this invocation as a workflow step outcome
    pub fn into_outcome(self) -> StepOutcome {
        if self.ok {
            StepOutcome::Completed
        } else if self.output.is_empty() {
            match self.code {
                Some(code) => StepOutcome::Failed(format!("git exited with code {}", code)),
                None => StepOutcome::Failed("git terminated abnormally".to_string()),
            }
        } else {
            StepOutcome::Failed(self.output)
        }
    }
}

/// Runs git subcommands
///
/// Implementors must never panic or return early on failure: every problem
/// collapses into a [CommandOutput] with `ok == false` and the best available
/// diagnostic.
pub trait GitBackend: Send + Sync {
    /// Run `git <args>` and capture the outcome
    fn run(&self, args: &[&str]) -> CommandOutput;
}

/// Typed git operations on top of a [GitBackend]
pub struct Gateway<B> {
    backend: B,
}

impl<B: GitBackend> Gateway<B> {
    pub fn new(backend: B) -> Self {
        Gateway { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run an arbitrary git command
    pub fn run(&self, args: &[&str]) -> CommandOutput {
        self.backend.run(args)
    }

    pub fn current_branch(&self) -> CommandOutput {
        self.run(&["branch", "--show-current"])
    }

    pub fn head_commit(&self) -> CommandOutput {
        self.run(&["rev-parse", "HEAD"])
    }

    pub fn porcelain_status(&self) -> CommandOutput {
        self.run(&["status", "--porcelain"])
    }

    /// Commits on HEAD that the upstream tracking ref does not have, one per line
    pub fn unpushed_log(&self) -> CommandOutput {
        self.run(&["log", "@{u}..HEAD", "--oneline"])
    }

    pub fn create_and_switch(&self, branch: &str) -> CommandOutput {
        self.run(&["checkout", "-b", branch])
    }

    pub fn switch(&self, branch: &str) -> CommandOutput {
        self.run(&["checkout", branch])
    }

    pub fn stage_all(&self) -> CommandOutput {
        self.run(&["add", "-A"])
    }

    pub fn commit(&self, message: &str) -> CommandOutput {
        self.run(&["commit", "-m", message])
    }

    pub fn annotated_tag(&self, name: &str, message: &str) -> CommandOutput {
        self.run(&["tag", "-a", name, "-m", message])
    }

    pub fn push_branch(&self, remote: &str, branch: &str) -> CommandOutput {
        self.run(&["push", remote, branch])
    }

    pub fn push_tags(&self, remote: &str) -> CommandOutput {
        self.run(&["push", remote, "--tags"])
    }

    pub fn list_remote_branches(&self, pattern: &str) -> CommandOutput {
        self.run(&["branch", "-r", "--list", pattern])
    }

    pub fn delete_remote_branch(&self, remote: &str, branch: &str) -> CommandOutput {
        self.run(&["push", remote, "--delete", branch])
    }

    /// Exit code 0 means the index matches HEAD, 1 means changes are staged.
    pub fn staged_changes_check(&self) -> CommandOutput {
        self.run(&["diff", "--cached", "--quiet"])
    }

    pub fn local_branch_check(&self, branch: &str) -> CommandOutput {
        let reference = format!("refs/heads/{}", branch);
        self.run(&["rev-parse", "--verify", "--quiet", &reference])
    }
}
