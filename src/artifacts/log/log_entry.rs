use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub summary: String,
}

impl LogEntry {
    /// Parse a `<sha> <summary>` line, returning `None` for blank or malformed lines
    pub fn parse_line(line: &str) -> Option<Self> {
        let (oid, summary) = line.split_once(' ')?;
        let oid = ObjectId::try_parse(oid.to_string()).ok()?;

        Some(LogEntry::new(oid, summary.to_string()))
    }

    pub fn to_line(&self) -> String {
        format!("{} {}\n", self.oid, self.summary)
    }
}
