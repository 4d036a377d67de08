use anyhow::Context;
use file_guard::{FileGuard, Lock};
use std::fs::File;
use std::path::Path;

/// Exclusive advisory lock held for one load/mutate/persist cycle
///
/// Released when dropped.
pub struct SessionLock {
    _guard: FileGuard<Box<File>>,
}

impl SessionLock {
    pub fn acquire(lock_path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .with_context(|| format!("Unable to open lock file {}", lock_path.display()))?;

        let guard = file_guard::lock(Box::new(file), Lock::Exclusive, 0, 1)
            .with_context(|| format!("Unable to lock {}", lock_path.display()))?;
        tracing::debug!(path = %lock_path.display(), "acquired session lock");

        Ok(SessionLock { _guard: guard })
    }
}
