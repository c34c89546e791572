use git_milestone::domain::RepositoryStatus;
use git_milestone::git::{CommandOutput, Gateway, ScriptedBackend};
use git_milestone::inspector::StatusInspector;

#[test]
fn test_every_query_failing_yields_fail_safe_status() {
    let git = Gateway::new(ScriptedBackend::new().otherwise(CommandOutput::failure(None, "No such file or directory")));

    let status = StatusInspector::new(&git).status();

    assert_eq!(
        status,
        RepositoryStatus {
            current_branch: "unknown".to_string(),
            latest_commit: "unknown".to_string(),
            has_changes: true,
            unpushed_commits: 0,
        }
    );
}

#[test]
fn test_missing_upstream_counts_zero_unpushed() {
    let git = Gateway::new(
        ScriptedBackend::new()
            .respond(&["branch", "--show-current"], true, "feature")
            .respond(
                &["log", "@{u}..HEAD", "--oneline"],
                false,
                "fatal: no upstream configured for branch 'feature'",
            ),
    );

    let status = StatusInspector::new(&git).status();

    assert_eq!(status.current_branch, "feature");
    assert_eq!(status.unpushed_commits, 0);
    assert!(!status.has_changes);
}

#[test]
fn test_unpushed_commits_are_counted_by_line() {
    let git = Gateway::new(ScriptedBackend::new().respond(
        &["log", "@{u}..HEAD", "--oneline"],
        true,
        "a1b2c3d add cleanup\n4e5f6a7 fix tags\n8b9c0d1 docs",
    ));

    assert_eq!(StatusInspector::new(&git).status().unpushed_commits, 3);
}

#[test]
fn test_status_queries_are_read_only() {
    let git = Gateway::new(ScriptedBackend::new());
    StatusInspector::new(&git).status();

    assert_eq!(git.backend().calls().len(), 4);
    assert!(git.backend().mutating_calls().is_empty());
}
