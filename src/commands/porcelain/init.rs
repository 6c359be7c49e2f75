use crate::areas::repository::Repository;
use crate::artifacts::core::output::{OutputKind, paint};
use anyhow::Context;
use std::fs;
use std::io::Write;

pub const DEFAULT_BRANCH: &str = "main";

impl Repository {
    /// Create the `.loki` layout; existing state is left untouched
    pub fn init(&self) -> anyhow::Result<()> {
        let reinitialized = self.loki_path().is_dir();

        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .loki/objects directory")?;

        fs::create_dir_all(self.refs().refs_path())
            .context("Failed to create .loki/refs directory")?;

        if !self.refs().head_path().exists() {
            self.refs()
                .set_head(DEFAULT_BRANCH)
                .context("Failed to create initial HEAD reference")?;
        }

        let config_path = self.loki_path().join("config");
        if !config_path.exists() {
            fs::write(&config_path, b"").context("Failed to create .loki/config file")?;
        }

        let verb = if reinitialized {
            "Reinitialized existing"
        } else {
            "Initialized empty"
        };
        writeln!(
            self.writer(),
            "{} {}",
            paint(format!("{verb} Loki repository at"), OutputKind::Success),
            paint(self.path().display().to_string(), OutputKind::Notice)
        )?;

        Ok(())
    }
}
