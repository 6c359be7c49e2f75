use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_loki_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

/// Repository with `1.txt`, `a/2.txt` and `a/b/3.txt` committed as "Initial commit"
#[fixture]
pub fn committed_repository_dir(init_repository_dir: TempDir) -> TempDir {
    let dir = init_repository_dir.path();

    write_file(FileSpec::new(dir.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(dir.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(
        dir.join("a").join("b").join("3.txt"),
        "three".to_string(),
    ));

    run_loki_command(dir, &["add", "1.txt", "a/2.txt", "a/b/3.txt"])
        .assert()
        .success();

    loki_commit(dir, "Initial commit").assert().success();

    init_repository_dir
}

pub fn run_loki_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("loki").expect("Failed to find loki binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("LOKI_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn loki_commit(dir: &Path, message: &str) -> Command {
    run_loki_command(dir, &["commit", "-m", message])
}

pub fn loki_stdout(dir: &Path, args: &[&str]) -> String {
    let output = run_loki_command(dir, args)
        .output()
        .expect("Failed to run loki");
    assert!(output.status.success(), "loki {:?} failed: {:?}", args, output);

    String::from_utf8(output.stdout).expect("stdout is not UTF-8")
}

/// Commit hash the `main` branch points to
pub fn head_commit_sha(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".loki").join("refs").join("main"))
        .expect("Failed to read refs/main")
        .trim()
        .to_string()
}
