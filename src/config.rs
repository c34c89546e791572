use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{default_milestone_branch, BackupBranchTemplate};
use crate::error::{MilestoneError, Result};

/// Project-local TOML configuration
pub const LOCAL_CONFIG: &str = "milestones.toml";

/// Project-local JSON configuration in the `gitAutomation` layout
pub const LEGACY_JSON_CONFIG: &str = "config/git_mcp_config.json";

/// Represents the complete configuration for git-milestone.
///
/// Contains the milestone definitions keyed by milestone name and the backup policy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub milestones: BTreeMap<String, MilestoneDefinition>,

    #[serde(default, alias = "autoBackup")]
    pub backup: BackupPolicy,
}

/// A named checkpoint: target branch, commit message and tags.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MilestoneDefinition {
    #[serde(default)]
    pub description: String,

    /// Target branch; `milestone-<key>` when absent
    #[serde(default)]
    pub branch: Option<String>,

    #[serde(alias = "commitMessage")]
    pub commit_message: String,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl MilestoneDefinition {
    /// Branch this milestone commits to
    pub fn target_branch(&self, key: &str) -> String {
        self.branch
            .clone()
            .unwrap_or_else(|| default_milestone_branch(key))
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_backup_branch() -> String {
    "backup/auto-{timestamp}".to_string()
}

fn default_keep_last() -> usize {
    5
}

/// Remote replication, backup-branch naming and retention settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BackupPolicy {
    #[serde(default, alias = "remoteBackup")]
    pub remote_backup: bool,

    #[serde(default = "default_remote")]
    pub remote: String,

    /// Must contain a `{timestamp}` placeholder
    #[serde(default = "default_backup_branch", alias = "backupBranch")]
    pub backup_branch: String,

    #[serde(default, alias = "cleanupOldBackups")]
    pub cleanup: CleanupPolicy,
}

impl Default for BackupPolicy {
    fn default() -> Self {
        BackupPolicy {
            remote_backup: false,
            remote: default_remote(),
            backup_branch: default_backup_branch(),
            cleanup: CleanupPolicy::default(),
        }
    }
}

impl BackupPolicy {
    pub fn template(&self) -> Result<BackupBranchTemplate> {
        BackupBranchTemplate::new(self.backup_branch.clone())
    }
}

/// Retention of remote backup branches.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CleanupPolicy {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_keep_last", alias = "keepLast")]
    pub keep_last: usize,
}

impl Default for CleanupPolicy {
    fn default() -> Self {
        CleanupPolicy {
            enabled: false,
            keep_last: default_keep_last(),
        }
    }
}

/// JSON documents nest the configuration under `gitAutomation`.
#[derive(Deserialize)]
struct JsonDocument {
    #[serde(rename = "gitAutomation")]
    git_automation: Config,
}

impl Config {
    /// Look up a milestone, failing for keys that are not configured
    pub fn milestone(&self, key: &str) -> Result<&MilestoneDefinition> {
        self.milestones
            .get(key)
            .ok_or_else(|| MilestoneError::UnknownMilestone(key.to_string()))
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.backup.template()?;

        if self.backup.remote.trim().is_empty() {
            return Err(MilestoneError::config("Backup remote must not be empty"));
        }

        for (key, milestone) in &self.milestones {
            if milestone.commit_message.trim().is_empty() {
                return Err(MilestoneError::config(format!(
                    "Milestone '{}' has an empty commit message",
                    key
                )));
            }
            if milestone.target_branch(key).trim().is_empty() {
                return Err(MilestoneError::config(format!(
                    "Milestone '{}' has an empty branch name",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Parse configuration text, using JSON for `.json` paths and TOML otherwise
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let config = if is_json {
            serde_json::from_str::<JsonDocument>(contents)
                .map(|doc| doc.git_automation)
                .map_err(|e| {
                    MilestoneError::config(format!("Malformed {}: {}", path.display(), e))
                })?
        } else {
            toml::from_str::<Config>(contents).map_err(|e| {
                MilestoneError::config(format!("Malformed {}: {}", path.display(), e))
            })?
        };

        config.validate()?;
        Ok(config)
    }
}

/// Resolve the configuration file to use.
///
/// Lookup order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `milestones.toml` in the given directory
/// 3. `config/git_mcp_config.json` in the given directory
/// 4. `.git-milestone.toml` in the user config directory
pub fn locate_config(config_path: Option<&str>, base_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = config_path {
        let path = PathBuf::from(path);
        if !path.is_file() {
            return Err(MilestoneError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        return Ok(path);
    }

    let mut candidates = vec![base_dir.join(LOCAL_CONFIG), base_dir.join(LEGACY_JSON_CONFIG)];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join(".git-milestone.toml"));
    }

    candidates
        .into_iter()
        .find(|candidate| candidate.is_file())
        .ok_or_else(|| {
            MilestoneError::config(format!(
                "No configuration found; create {} or pass --config",
                LOCAL_CONFIG
            ))
        })
}

/// Anchor a relative `--config` argument at the directory given with `-C`.
///
/// Absolute paths are returned unchanged.
pub fn anchor_config_path(config_path: &str, start_dir: &Path) -> String {
    let path = Path::new(config_path);
    if path.is_absolute() {
        config_path.to_string()
    } else {
        start_dir.join(path).to_string_lossy().into_owned()
    }
}

/// Loads and validates configuration.
///
/// # Arguments
/// * `config_path` - Optional path to a custom configuration file
/// * `base_dir` - Directory searched for project-local configuration
///
/// # Returns
/// * `Ok(Config)` - Loaded configuration
/// * `Err` - If no file is found, or it cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>, base_dir: &Path) -> Result<Config> {
    let path = locate_config(config_path, base_dir)?;
    tracing::debug!(path = %path.display(), "loading configuration");

    let contents = fs::read_to_string(&path).map_err(|e| {
        MilestoneError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    Config::parse(&contents, &path)
}
