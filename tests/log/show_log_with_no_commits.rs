use crate::common::command::{init_repository_dir, run_loki_command};
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_log_with_no_commits(init_repository_dir: TempDir) {
    run_loki_command(init_repository_dir.path(), &["log"])
        .assert()
        .success()
        .stdout("No commits yet\n");
}
