use crate::common::command::{committed_repository_dir, loki_commit, loki_stdout};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn restored_file_survives_a_staged_delete(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();
    let listing_before = loki_stdout(dir, &["ls-tree", "HEAD"]);

    std::fs::remove_file(dir.join("1.txt"))?;
    assert_eq!(loki_stdout(dir, &["add", "1.txt"]), "staged: 1.txt\n");

    std::fs::write(dir.join("1.txt"), "one")?;
    std::fs::write(dir.join("new.txt"), "new")?;
    assert_eq!(loki_stdout(dir, &["add", "new.txt"]), "staged: new.txt\n");

    loki_commit(dir, "Add new.txt").assert().success();

    let listing = loki_stdout(dir, &["ls-tree", "HEAD"]);
    let names = listing
        .lines()
        .filter_map(|line| line.split('\t').nth(1))
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["1.txt", "a/2.txt", "a/b/3.txt", "new.txt"]);
    assert_eq!(listing.lines().next(), listing_before.lines().next());

    Ok(())
}
