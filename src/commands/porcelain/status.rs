use crate::areas::repository::Repository;
use crate::artifacts::core::output::{OutputKind, paint};
use crate::artifacts::index::index_entry::IndexEntry;
use std::io::Write;

const LABEL_INDENT: usize = 8;

impl Repository {
    /// Staged records in the order they were first staged
    pub fn staged_changes(&self) -> anyhow::Result<Vec<IndexEntry>> {
        let mut index = self.index();
        index.rehydrate()?;

        Ok(index.entries().cloned().collect())
    }

    pub fn status(&self) -> anyhow::Result<()> {
        let changes = self.staged_changes()?;

        if changes.is_empty() {
            let line = paint("No files staged to commit", OutputKind::Warning);
            writeln!(self.writer(), "{line}")?;
            return Ok(());
        }

        let header = paint("Changes to be committed:", OutputKind::Info);
        writeln!(self.writer(), "{header}")?;
        for change in changes {
            writeln!(
                self.writer(),
                "{:>width$}{}   {}",
                "",
                paint(format!("{}:", change.status), OutputKind::Success),
                change.path,
                width = LABEL_INDENT
            )?;
        }

        Ok(())
    }
}
