//! Layered key/value configuration
//!
//! Three files are read in order, later ones overriding earlier ones:
//! - system: `/etc/loki/config`, or `$LOKI_CONFIG_SYSTEM` when set
//! - global: `$HOME/.loki/config`
//! - local:  `<repository>/.loki/config`
//!
//! Each file holds `key=value` lines. Blank lines and lines starting with `#`
//! are skipped, and keys and values are trimmed.

use anyhow::Context;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const SYSTEM_CONFIG_PATH: &str = "/etc/loki/config";
pub const SYSTEM_CONFIG_ENV: &str = "LOKI_CONFIG_SYSTEM";
const CONFIG_FILE: &str = ".loki/config";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigLevel {
    System,
    Global,
    #[default]
    Local,
}

impl ConfigLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigLevel::System => "system",
            ConfigLevel::Global => "global",
            ConfigLevel::Local => "local",
        }
    }

    /// Location of this tier's file, `None` when it cannot be determined
    pub fn path(&self, repo_root: Option<&Path>) -> Option<PathBuf> {
        match self {
            ConfigLevel::System => Some(
                std::env::var_os(SYSTEM_CONFIG_ENV)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(SYSTEM_CONFIG_PATH)),
            ),
            ConfigLevel::Global => {
                std::env::var_os("HOME").map(|home| Path::new(&home).join(CONFIG_FILE))
            }
            ConfigLevel::Local => repo_root.map(|root| root.join(CONFIG_FILE)),
        }
    }
}

impl fmt::Display for ConfigLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Default)]
pub struct Config {
    values: BTreeMap<String, String>,
}

impl Config {
    /// Merge every readable tier; unreadable tiers are skipped
    pub fn load(repo_root: Option<&Path>) -> Self {
        let mut config = Config::default();

        for level in [ConfigLevel::System, ConfigLevel::Global, ConfigLevel::Local] {
            if let Some(path) = level.path(repo_root) {
                config.load_file(&path);
            }
        }

        config
    }

    fn load_file(&mut self, path: &Path) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "skipping config file");
                return;
            }
        };

        self.values.extend(
            content
                .lines()
                .filter_map(parse_line)
                .map(|(key, value)| (key.to_string(), value.to_string())),
        );
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Write `key=value` into one tier's file
    ///
    /// An existing `key=` line is replaced in place, otherwise the pair is
    /// appended. Other lines, comments included, are kept as they are.
    pub fn set(
        level: ConfigLevel,
        repo_root: Option<&Path>,
        key: &str,
        value: &str,
    ) -> anyhow::Result<PathBuf> {
        let path = level
            .path(repo_root)
            .ok_or_else(|| anyhow::anyhow!("no location for {level} config"))?;

        let existing = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err).context(format!("Unable to read {}", path.display())),
        };

        let entry = format!("{key}={value}");
        let mut found = false;
        let mut lines = existing
            .lines()
            .map(|line| match parse_line(line) {
                Some((line_key, _)) if line_key == key => {
                    found = true;
                    entry.clone()
                }
                _ => line.to_string(),
            })
            .collect::<Vec<_>>();
        if !found {
            lines.push(entry);
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Unable to create {}", parent.display()))?;
        }
        let mut file = std::fs::File::create(&path)
            .context(format!("Unable to write {}", path.display()))?;
        for line in lines {
            writeln!(file, "{line}")?;
        }

        tracing::info!(path = %path.display(), key, "updated config");
        Ok(path)
    }
}

fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    Some((key.trim(), value.trim()))
}
