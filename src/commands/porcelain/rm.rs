use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::GitletError;

impl Repository {
    pub fn rm(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(path)?;

        if self.index().is_staged(&path) {
            self.index_mut().unstage(&path);
            return Ok(());
        }

        let head = self.head_commit()?;
        if head.blob_id(&path).is_none() {
            return Err(GitletError::NoReasonToRemove.into());
        }

        self.workspace().remove_file(&path)?;
        self.index_mut().stage_remove(path);

        Ok(())
    }
}
