use crate::common::command::{init_repository_dir, loki_commit, loki_stdout, run_loki_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn re_adding_a_vanished_new_file_unstages_it(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    std::fs::write(dir.join("keep.txt"), "keep")?;
    std::fs::write(dir.join("tmp.txt"), "tmp")?;
    run_loki_command(dir, &["add", "keep.txt", "tmp.txt"])
        .assert()
        .success();

    std::fs::remove_file(dir.join("tmp.txt"))?;
    run_loki_command(dir, &["add", "tmp.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("pathspec 'tmp.txt' did not match any files"));

    assert_eq!(
        loki_stdout(dir, &["status"]),
        "Changes to be committed:\n        added:   keep.txt\n"
    );

    loki_commit(dir, "Keep only").assert().success();

    let listing = loki_stdout(dir, &["ls-tree", "HEAD"]);
    let names = listing
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["keep.txt"]);

    Ok(())
}
