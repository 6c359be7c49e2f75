use crate::areas::config::{Config, ConfigLevel};
use crate::areas::repository::find_root;
use std::io::Write;
use std::path::Path;

/// Read `key`, or write it into `level` when `value` is given
///
/// Config works outside a repository as long as the local tier is not
/// involved, so it does not go through `Repository`.
pub fn config(
    writer: &mut dyn Write,
    cwd: &Path,
    level: ConfigLevel,
    key: &str,
    value: Option<&str>,
) -> anyhow::Result<()> {
    let repo_root = find_root(cwd);

    match value {
        None => match Config::load(repo_root.as_deref()).get(key) {
            Some(value) => writeln!(writer, "{key}={value}")?,
            None => writeln!(writer, "{key} not set")?,
        },
        Some(value) => {
            Config::set(level, repo_root.as_deref(), key, value)?;
            writeln!(writer, "Set {key}={value} ({level})")?;
        }
    }

    Ok(())
}
