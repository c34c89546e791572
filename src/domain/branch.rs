use regex::Regex;

use crate::domain::Timestamp;
use crate::error::{MilestoneError, Result};

const PLACEHOLDER: &str = "{timestamp}";

/// Characters `git branch --list` treats as wildcards
const GLOB_METACHARACTERS: &[char] = &['*', '?', '['];

/// Branch a milestone commits to when its definition names none
pub fn default_milestone_branch(key: &str) -> String {
    format!("milestone-{}", key)
}

/// Backup branch naming template (e.g., "backup/auto-{timestamp}")
#[derive(Debug, Clone)]
pub struct BackupBranchTemplate {
    pattern: String,
    matcher: Regex,
}

impl BackupBranchTemplate {
    /// Create a template, rejecting patterns without a `{timestamp}` placeholder
    /// or with glob wildcards that would widen the remote listing.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        if !pattern.contains(PLACEHOLDER) {
            return Err(MilestoneError::config(format!(
                "Backup branch template '{}' must contain {{timestamp}}",
                pattern
            )));
        }
        if pattern.contains(GLOB_METACHARACTERS) {
            return Err(MilestoneError::config(format!(
                "Backup branch template '{}' must not contain '*', '?' or '['",
                pattern
            )));
        }

        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\{timestamp\}", r"(\d{8}_\d{6})");
        let matcher = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| MilestoneError::config(format!("Invalid backup branch template: {}", e)))?;

        Ok(BackupBranchTemplate { pattern, matcher })
    }

    /// Format a branch name for the given timestamp
    /// Example: pattern="backup/auto-{timestamp}" -> "backup/auto-20240101_120000"
    pub fn render(&self, timestamp: &Timestamp) -> String {
        self.pattern.replace(PLACEHOLDER, timestamp.as_str())
    }

    /// Literal part of the template before the first placeholder
    pub fn prefix(&self) -> &str {
        match self.pattern.find(PLACEHOLDER) {
            Some(idx) => &self.pattern[..idx],
            None => &self.pattern,
        }
    }

    /// `branch -r --list` pattern selecting this template's branches on a remote
    pub fn remote_glob(&self, remote: &str) -> String {
        format!("{}/{}*", remote, self.prefix())
    }

    /// Recover the timestamp embedded in a branch produced by this template
    pub fn timestamp_of(&self, branch: &str) -> Option<Timestamp> {
        let captures = self.matcher.captures(branch)?;
        Timestamp::parse(captures.get(1)?.as_str())
    }
}
