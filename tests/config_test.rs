// tests/config_test.rs
use git_milestone::config::{
    anchor_config_path, load_config, locate_config, LEGACY_JSON_CONFIG, LOCAL_CONFIG,
};
use git_milestone::MilestoneError;
use serial_test::serial;
use std::fs;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

#[test]
fn test_load_toml_from_explicit_path() {
    let mut temp_file = Builder::new().suffix(".toml").tempfile().unwrap();
    let toml_content = r#"
[backup]
remote_backup = true
backup_branch = "backup/{timestamp}"

[backup.cleanup]
enabled = true
keep_last = 2

[milestones.v1-release]
description = "First release"
branch = "milestone-v1"
commit_message = "Release v1"
tags = ["v1.0"]
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(temp_file.path().to_str().unwrap()), dir.path()).unwrap();

    assert!(config.backup.remote_backup);
    assert_eq!(config.backup.backup_branch, "backup/{timestamp}");
    assert_eq!(config.backup.cleanup.keep_last, 2);
    assert_eq!(
        config.milestone("v1-release").unwrap().commit_message,
        "Release v1"
    );
}

#[test]
fn test_load_legacy_json_document() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    let json_content = r#"{
  "gitAutomation": {
    "enabled": true,
    "milestones": {
      "phase1": {
        "description": "Phase one complete",
        "branch": "milestone-phase1",
        "commitMessage": "feat: phase one",
        "tags": ["v0.1.0", "phase1"]
      }
    },
    "autoBackup": {
      "remoteBackup": false,
      "backupBranch": "backup/auto-{timestamp}",
      "cleanupOldBackups": { "enabled": true, "keepLast": 10 }
    }
  }
}"#;
    temp_file.write_all(json_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let config = load_config(Some(temp_file.path().to_str().unwrap()), dir.path()).unwrap();

    let phase1 = config.milestone("phase1").unwrap();
    assert_eq!(phase1.commit_message, "feat: phase one");
    assert_eq!(phase1.tags, vec!["v0.1.0", "phase1"]);
    assert!(!config.backup.remote_backup);
    assert!(config.backup.cleanup.enabled);
    assert_eq!(config.backup.cleanup.keep_last, 10);
}

#[test]
fn test_missing_explicit_path_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load_config(Some(missing.to_str().unwrap()), dir.path()).unwrap_err();
    assert!(matches!(err, MilestoneError::Config(_)));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_malformed_json_is_config_error() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
    temp_file.write_all(b"{ \"gitAutomation\": ").unwrap();
    temp_file.flush().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(temp_file.path().to_str().unwrap()), dir.path()).unwrap_err();
    assert!(matches!(err, MilestoneError::Config(_)));
}

#[test]
fn test_milestone_without_commit_message_is_rejected() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[milestones.alpha]\ndescription = \"Alpha\"\n")
        .unwrap();
    temp_file.flush().unwrap();

    let dir = tempfile::tempdir().unwrap();
    assert!(load_config(Some(temp_file.path().to_str().unwrap()), dir.path()).is_err());
}

#[test]
fn test_project_toml_found_in_base_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(LOCAL_CONFIG),
        "[milestones.alpha]\ncommit_message = \"Alpha\"\n",
    )
    .unwrap();

    let path = locate_config(None, dir.path()).unwrap();
    assert_eq!(path, dir.path().join(LOCAL_CONFIG));

    let config = load_config(None, dir.path()).unwrap();
    assert!(config.milestones.contains_key("alpha"));
}

#[test]
fn test_toml_preferred_over_legacy_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join(LEGACY_JSON_CONFIG),
        r#"{"gitAutomation": {"milestones": {}}}"#,
    )
    .unwrap();

    assert_eq!(
        locate_config(None, dir.path()).unwrap(),
        dir.path().join(LEGACY_JSON_CONFIG)
    );

    fs::write(
        dir.path().join(LOCAL_CONFIG),
        "[milestones.alpha]\ncommit_message = \"Alpha\"\n",
    )
    .unwrap();

    assert_eq!(
        locate_config(None, dir.path()).unwrap(),
        dir.path().join(LOCAL_CONFIG)
    );
}

#[test]
fn test_relative_config_path_is_anchored_at_start_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("conf")).unwrap();
    fs::write(
        dir.path().join("conf/alt.toml"),
        "[milestones.alpha]\ncommit_message = \"Alpha\"\n",
    )
    .unwrap();

    let anchored = anchor_config_path("conf/alt.toml", dir.path());
    assert_eq!(
        std::path::PathBuf::from(&anchored),
        dir.path().join("conf/alt.toml")
    );

    let config = load_config(Some(&anchored), dir.path()).unwrap();
    assert!(config.milestones.contains_key("alpha"));
}

#[test]
fn test_absolute_config_path_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let absolute = dir.path().join("milestones.toml");
    let absolute = absolute.to_str().unwrap();

    assert_eq!(anchor_config_path(absolute, std::path::Path::new("/elsewhere")), absolute);
}

/// Point the user config directory at `dir` for the duration of `f`.
#[cfg(target_os = "linux")]
fn with_user_config_dir<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
    let previous = std::env::var_os("XDG_CONFIG_HOME");
    std::env::set_var("XDG_CONFIG_HOME", dir);
    let result = f();
    match previous {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    result
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_no_configuration_anywhere_is_config_error() {
    let project = tempfile::tempdir().unwrap();
    let user = tempfile::tempdir().unwrap();

    let result = with_user_config_dir(user.path(), || locate_config(None, project.path()));
    assert!(matches!(result, Err(MilestoneError::Config(_))));
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn test_user_config_dir_is_last_resort() {
    let project = tempfile::tempdir().unwrap();
    let user = tempfile::tempdir().unwrap();
    let user_config = user.path().join(".git-milestone.toml");
    fs::write(&user_config, "[milestones.alpha]\ncommit_message = \"Alpha\"\n").unwrap();

    let found = with_user_config_dir(user.path(), || locate_config(None, project.path())).unwrap();
    assert_eq!(found, user_config);
}
