use crate::common::command::{init_repository_dir, loki_stdout, run_loki_command};
use assert_fs::TempDir;
use assert_fs::prelude::*;
use fake::Fake;
use fake::faker::lorem::en::{Word, Words};
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn adding_a_non_existent_file_is_reported(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let valid_file_name = format!("{}.txt", Word().fake::<String>());
    init_repository_dir
        .child(&valid_file_name)
        .write_str(&Words(5..10).fake::<Vec<String>>().join(" "))?;
    let missing_file_name = format!("missing_{}.txt", Word().fake::<String>());

    run_loki_command(
        init_repository_dir.path(),
        &["add", &missing_file_name, &valid_file_name],
    )
    .assert()
    .success()
    .stdout(format!("staged: {valid_file_name}\n"))
    .stderr(predicate::str::contains(format!(
        "pathspec '{missing_file_name}' did not match any files"
    )));

    let status = loki_stdout(init_repository_dir.path(), &["status"]);
    assert_eq!(
        status,
        format!("Changes to be committed:\n        added:   {valid_file_name}\n")
    );

    Ok(())
}

#[rstest]
fn adding_a_directory_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    init_repository_dir.child("dir/file.txt").write_str("content")?;

    run_loki_command(init_repository_dir.path(), &["add", "dir"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("'dir' is a directory"));

    assert_eq!(
        loki_stdout(init_repository_dir.path(), &["status"]),
        "No files staged to commit\n"
    );

    Ok(())
}

#[rstest]
fn adding_paths_outside_the_working_tree_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_loki_command(
        init_repository_dir.path(),
        &["add", "../elsewhere.txt", ".loki/HEAD"],
    )
    .assert()
    .success()
    .stderr(predicate::str::contains("'../elsewhere.txt' is outside repository"))
    .stderr(predicate::str::contains("'.loki/HEAD' is outside repository"));

    Ok(())
}

#[rstest]
fn add_without_paths_fails(init_repository_dir: TempDir) {
    run_loki_command(init_repository_dir.path(), &["add"])
        .assert()
        .failure();
}
