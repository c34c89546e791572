use crate::error::{MilestoneError, Result};
use crate::git::{CommandOutput, GitBackend};
use git2::Repository as Git2Repo;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs the `git` binary against an explicit work directory
#[derive(Debug, Clone)]
pub struct ProcessGit {
    workdir: PathBuf,
    program: String,
}

impl ProcessGit {
    /// Use `workdir` as-is
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        ProcessGit {
            workdir: workdir.into(),
            program: "git".to_string(),
        }
    }

    /// Discover the repository containing `path` and run commands at its work tree root
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        let workdir = repo.workdir().ok_or_else(|| {
            MilestoneError::config("Bare repositories have no working tree to back up")
        })?;

        Ok(ProcessGit::new(workdir))
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl GitBackend for ProcessGit {
    fn run(&self, args: &[&str]) -> CommandOutput {
        let result = Command::new(&self.program)
            .args(args)
            .current_dir(&self.workdir)
            .output();

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!(?args, error = %e, "git could not be started");
                return CommandOutput::failure(None, e.to_string());
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code();
        tracing::debug!(?args, ?code, "git finished");

        if output.status.success() {
            CommandOutput {
                ok: true,
                output: stdout,
                code,
            }
        } else if stderr.is_empty() {
            CommandOutput::failure(code, stdout)
        } else {
            CommandOutput::failure(code, stderr)
        }
    }
}
