use crate::common::command::{
    committed_repository_dir, head_commit_sha, init_repository_dir, loki_commit, loki_stdout,
    run_loki_command,
};
use crate::common::short_oid_from_commit_output;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn first_commit_is_a_root_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    init_repository_dir.child("a.txt").write_str("hello")?;
    run_loki_command(dir, &["add", "a.txt"]).assert().success();

    let output = loki_commit(dir, "first\n\nwith a body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[\(root-commit\) [0-9a-f]{7}\] first\n$")?);

    let short_oid = short_oid_from_commit_output(&output.get_output().stdout);
    let head = head_commit_sha(dir);
    assert!(head.starts_with(&short_oid));

    assert_eq!(loki_stdout(dir, &["status"]), "No files staged to commit\n");
    let commit = loki_stdout(dir, &["cat-file", "-p", &head]);
    assert!(commit.starts_with("tree "));
    assert!(commit.ends_with("\n\nfirst\n\nwith a body\n"));

    Ok(())
}

#[rstest]
fn later_commits_move_the_branch(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let first = head_commit_sha(dir);

    std::fs::write(dir.join("1.txt"), "uno")?;
    run_loki_command(dir, &["add", "1.txt"]).assert().success();

    let output = loki_commit(dir, "Translate 1.txt")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\[[0-9a-f]{7}\] Translate 1.txt\n$")?);

    let second = head_commit_sha(dir);
    assert_ne!(first, second);
    assert!(second.starts_with(&short_oid_from_commit_output(&output.get_output().stdout)));
    assert_eq!(
        std::fs::read_to_string(dir.join(".loki/HEAD"))?,
        "ref: refs/main"
    );

    Ok(())
}
