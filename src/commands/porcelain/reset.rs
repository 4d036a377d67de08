use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the working directory and the active branch to `commit`
    pub fn reset(&mut self, commit: &str) -> anyhow::Result<()> {
        let target_oid = Revision::new(commit).resolve(self.history())?;

        let head = self.head_commit()?;
        let target = self.load_commit(&target_oid)?;
        let mut migration = Migration::new(self, head.manifest(), target.manifest());
        migration.apply_changes()?;

        let head_branch = self.refs().head_branch().clone();
        self.refs_mut().advance(&head_branch, target_oid.clone())?;
        self.index_mut().clear_tracked();
        tracing::info!(branch = %head_branch, head = %target_oid.to_short_oid(), "reset branch");

        Ok(())
    }
}
