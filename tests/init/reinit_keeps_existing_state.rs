use crate::common::command::{committed_repository_dir, head_commit_sha, run_loki_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn reinit_keeps_existing_state(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let head_before = head_commit_sha(dir);
    std::fs::write(dir.join(".loki/config"), "user.name=alice\n")?;

    run_loki_command(dir, &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Reinitialized existing Loki repository at"));

    assert_eq!(head_commit_sha(dir), head_before);
    assert_eq!(std::fs::read_to_string(dir.join(".loki/HEAD"))?, "ref: refs/main");
    assert_eq!(std::fs::read_to_string(dir.join(".loki/config"))?, "user.name=alice\n");

    Ok(())
}
