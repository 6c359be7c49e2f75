use crate::areas::repository::Repository;
use crate::artifacts::core::output::{OutputKind, paint};
use std::io::Write;

impl Repository {
    /// Print `<sha> <summary>` for every commit, oldest first
    pub fn log(&self) -> anyhow::Result<()> {
        let entries = self.database().read_log()?;

        if entries.is_empty() {
            writeln!(self.writer(), "{}", paint("No commits yet", OutputKind::Warning))?;
            return Ok(());
        }

        for entry in entries {
            writeln!(
                self.writer(),
                "{} {}",
                paint(entry.oid.as_ref(), OutputKind::Info),
                entry.summary
            )?;
        }

        Ok(())
    }
}
