use crate::common::command::{init_repository_dir, run_loki_command};
use assert_cmd::Command;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::path::Path;

#[fixture]
fn home_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn config_command(dir: &Path, home: &Path, args: &[&str]) -> Command {
    let mut cmd = run_loki_command(dir, &["config"]);
    cmd.env("HOME", home);
    cmd.env("LOKI_CONFIG_SYSTEM", home.join("system-config"));
    cmd.args(args);
    cmd
}

#[rstest]
fn unset_key_is_reported(init_repository_dir: TempDir, home_dir: TempDir) {
    config_command(init_repository_dir.path(), home_dir.path(), &["user.name"])
        .assert()
        .success()
        .stdout("user.name not set\n");
}

#[rstest]
fn local_is_the_default_tier(
    init_repository_dir: TempDir,
    home_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    config_command(dir, home_dir.path(), &["user.name", "alice"])
        .assert()
        .success()
        .stdout("Set user.name=alice (local)\n");

    assert_eq!(
        std::fs::read_to_string(dir.join(".loki/config"))?,
        "user.name=alice\n"
    );
    config_command(dir, home_dir.path(), &["user.name"])
        .assert()
        .success()
        .stdout("user.name=alice\n");

    Ok(())
}

#[rstest]
fn later_tiers_override_earlier_ones(
    init_repository_dir: TempDir,
    home_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    let home = home_dir.path();

    config_command(dir, home, &["--system", "core.editor", "ed"])
        .assert()
        .success();
    config_command(dir, home, &["--system", "user.name", "root"])
        .assert()
        .success();
    config_command(dir, home, &["--global", "user.name", "alice"])
        .assert()
        .success()
        .stdout("Set user.name=alice (global)\n");

    assert_eq!(
        std::fs::read_to_string(home.join(".loki/config"))?,
        "user.name=alice\n"
    );

    config_command(dir, home, &["user.name"])
        .assert()
        .success()
        .stdout("user.name=alice\n");
    config_command(dir, home, &["core.editor"])
        .assert()
        .success()
        .stdout("core.editor=ed\n");

    config_command(dir, home, &["--local", "user.name", "bob"])
        .assert()
        .success();
    config_command(dir, home, &["user.name"])
        .assert()
        .success()
        .stdout("user.name=bob\n");

    Ok(())
}

#[rstest]
fn global_config_works_outside_a_repository(
    home_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let outside = TempDir::new()?;

    config_command(outside.path(), home_dir.path(), &["--global", "user.name", "alice"])
        .assert()
        .success();
    config_command(outside.path(), home_dir.path(), &["user.name"])
        .assert()
        .success()
        .stdout("user.name=alice\n");

    config_command(outside.path(), home_dir.path(), &["user.email", "a@b.c"])
        .assert()
        .failure();

    Ok(())
}

#[rstest]
fn conflicting_tier_flags_are_rejected(init_repository_dir: TempDir, home_dir: TempDir) {
    config_command(
        init_repository_dir.path(),
        home_dir.path(),
        &["--global", "--local", "user.name", "alice"],
    )
    .assert()
    .failure();
}
