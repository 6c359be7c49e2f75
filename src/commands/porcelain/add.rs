use crate::areas::repository::Repository;
use crate::artifacts::core::output::{OutputKind, paint};
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Stage `paths` (relative to `cwd`) against the last commit
    ///
    /// A path that cannot be staged is reported on stderr and skipped. The
    /// whole batch runs under the repository lock and the index is written
    /// once at the end. Returns how many paths were skipped.
    pub fn add(&self, cwd: &Path, paths: &[String]) -> anyhow::Result<usize> {
        if paths.is_empty() {
            anyhow::bail!("no files specified");
        }

        let _lock = self.lock()?;
        self.index().rehydrate()?;

        let last_tree = self.last_commit_tree();
        let mut skipped = 0;

        for path in paths {
            let staged = self.workspace().resolve(cwd, path).and_then(|relative| {
                let status = self.stage_file(&relative, last_tree.as_ref())?;
                Ok((relative, status))
            });

            match staged {
                Ok((relative, Some(_))) => {
                    let line = paint(format!("staged: {relative}"), OutputKind::Success);
                    writeln!(self.writer(), "{line}")?;
                }
                Ok((relative, None)) => {
                    let line = paint(format!("unchanged: {relative}"), OutputKind::Notice);
                    writeln!(self.writer(), "{line}")?;
                }
                Err(err) => {
                    tracing::debug!(path = %path, error = %err, "unable to stage path");
                    eprintln!("{}", paint(format!("error: {err:#}"), OutputKind::Error));
                    skipped += 1;
                }
            }
        }

        if self.index().is_changed() {
            self.index().write_updates()?;
        }

        Ok(skipped)
    }
}
