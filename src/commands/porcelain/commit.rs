use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::{Commit, load_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        if !self.index().has_pending_changes() {
            return Err(GitletError::NothingToCommit.into());
        }
        if message.trim().is_empty() {
            return Err(GitletError::EmptyCommitMessage.into());
        }

        self.write_commit(None, message.to_string())?;

        Ok(())
    }

    /// Record the staged changes on top of the head commit and advance the active branch
    ///
    /// The whole staging index is cleared afterwards.
    pub(crate) fn write_commit(
        &mut self,
        merge_parent: Option<ObjectId>,
        message: String,
    ) -> anyhow::Result<ObjectId> {
        let parent = self.refs().head_commit().clone();
        let head = self.load_commit(&parent)?;
        let manifest = self.index().apply_to(head.manifest());

        let commit = Commit::new(
            Some(parent),
            merge_parent,
            load_timestamp_from_env(),
            message,
            manifest,
        );
        let commit_id = self.database().store(&commit)?;

        let head_branch = self.refs().head_branch().clone();
        self.refs_mut().advance(&head_branch, commit_id.clone())?;
        self.record_commit(commit_id.clone());
        self.index_mut().clear_all();

        tracing::debug!(
            oid = %commit_id,
            branch = %head_branch,
            files = commit.manifest().len(),
            "created commit"
        );

        Ok(commit_id)
    }
}
