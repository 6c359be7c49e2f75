use crate::common::command::{head_commit_sha, loki_commit, loki_stdout, run_loki_command};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use std::path::Path;

/// init, commit `a.txt` = "hello", then commit it again as "world"
fn run_scenario(dir: &Path) -> Result<(Vec<String>, String), Box<dyn std::error::Error>> {
    let mut commits = Vec::new();

    run_loki_command(dir, &["init"]).assert().success();

    std::fs::write(dir.join("a.txt"), "hello")?;
    assert_eq!(loki_stdout(dir, &["add", "a.txt"]), "staged: a.txt\n");
    assert_eq!(
        loki_stdout(dir, &["status"]),
        "Changes to be committed:\n        added:   a.txt\n"
    );
    loki_commit(dir, "first").assert().success();
    commits.push(head_commit_sha(dir));
    assert_eq!(loki_stdout(dir, &["status"]), "No files staged to commit\n");

    std::fs::write(dir.join("a.txt"), "world")?;
    assert_eq!(loki_stdout(dir, &["add", "a.txt"]), "staged: a.txt\n");
    assert_eq!(
        loki_stdout(dir, &["status"]),
        "Changes to be committed:\n        modified:   a.txt\n"
    );
    loki_commit(dir, "second").assert().success();
    commits.push(head_commit_sha(dir));

    Ok((commits, loki_stdout(dir, &["log"])))
}

#[test]
fn show_commits_in_commit_order() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let (commits, log) = run_scenario(dir.path())?;

    assert_ne!(commits[0], commits[1]);
    assert_eq!(log, format!("{} first\n{} second\n", commits[0], commits[1]));

    Ok(())
}

#[test]
fn identical_histories_have_identical_hashes() -> Result<(), Box<dyn std::error::Error>> {
    let first = TempDir::new()?;
    let second = TempDir::new()?;

    let (first_commits, first_log) = run_scenario(first.path())?;
    let (second_commits, second_log) = run_scenario(second.path())?;

    assert_eq!(first_commits, second_commits);
    assert_eq!(first_log, second_log);

    Ok(())
}
