/// Why a tracked file shows up under "Modifications Not Staged For Commit"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl WorkspaceChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }

    /// Stable one-byte tag used by the session snapshot
    pub fn as_tag(&self) -> u8 {
        match self {
            WorkspaceChangeType::Modified => b'M',
            WorkspaceChangeType::Deleted => b'D',
        }
    }
}

impl TryFrom<u8> for WorkspaceChangeType {
    type Error = anyhow::Error;

    fn try_from(tag: u8) -> anyhow::Result<Self> {
        match tag {
            b'M' => Ok(WorkspaceChangeType::Modified),
            b'D' => Ok(WorkspaceChangeType::Deleted),
            _ => Err(anyhow::anyhow!("Invalid workspace change tag: {tag}")),
        }
    }
}

impl std::fmt::Display for WorkspaceChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
