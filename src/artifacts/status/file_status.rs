use crate::errors::LokiError;

/// Pending change for one path, relative to the last commit's tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileStatus {
    /// Present in the working tree, absent from the last commit
    Added,
    /// Present in both, with different content
    Modified,
    /// Present in the last commit, gone from the working tree
    Deleted,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Added => "added",
            FileStatus::Modified => "modified",
            FileStatus::Deleted => "deleted",
        }
    }

    /// Single-byte tag used in the index file
    pub fn code(&self) -> u8 {
        match self {
            FileStatus::Added => 1,
            FileStatus::Modified => 2,
            FileStatus::Deleted => 3,
        }
    }
}

impl TryFrom<u8> for FileStatus {
    type Error = anyhow::Error;

    fn try_from(code: u8) -> anyhow::Result<Self> {
        match code {
            1 => Ok(FileStatus::Added),
            2 => Ok(FileStatus::Modified),
            3 => Ok(FileStatus::Deleted),
            _ => Err(LokiError::CorruptObject(format!("invalid index status code {code}")).into()),
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
