use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, cwd: &Path, file: &str, write: bool) -> anyhow::Result<ObjectId> {
        let relative = self.workspace().resolve(cwd, file)?;
        let blob = self.workspace().parse_blob(&relative)?;

        let object_id = if write {
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(object_id)
    }
}
