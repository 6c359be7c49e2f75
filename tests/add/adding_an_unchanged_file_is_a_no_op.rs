use crate::common::command::{committed_repository_dir, loki_stdout};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_an_unchanged_file_is_a_no_op(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    let stdout = loki_stdout(dir, &["add", "1.txt"]);
    assert_eq!(stdout, "unchanged: 1.txt\n");

    let status = loki_stdout(dir, &["status"]);
    assert_eq!(status, "No files staged to commit\n");

    Ok(())
}

#[rstest]
fn reverting_a_staged_change_unstages_it(
    committed_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = committed_repository_dir.path();

    std::fs::write(dir.join("1.txt"), "uno")?;
    assert_eq!(loki_stdout(dir, &["add", "1.txt"]), "staged: 1.txt\n");

    std::fs::write(dir.join("1.txt"), "one")?;
    assert_eq!(loki_stdout(dir, &["add", "1.txt"]), "unchanged: 1.txt\n");

    assert_eq!(loki_stdout(dir, &["status"]), "No files staged to commit\n");

    Ok(())
}
