use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::object::Object;

impl Repository {
    pub fn add(&mut self, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(path)?;
        if !self.workspace().exists(&path) {
            return Err(GitletError::FileNotFound.into());
        }

        let blob = self.workspace().parse_blob(&path)?;
        let blob_id = blob.object_id();
        let head = self.head_commit()?;

        // back to the committed version: nothing left to stage
        if head.blob_id(&path) == Some(&blob_id) {
            self.index_mut().unstage(&path);
            tracing::debug!(path = %path, "working copy matches head, unstaged");
            return Ok(());
        }

        self.database().store(&blob)?;
        self.index_mut().stage_add(path, blob_id);

        Ok(())
    }
}
