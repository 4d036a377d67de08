use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::GitletError;

impl Repository {
    /// Delete a branch pointer; the commits it pointed at stay in the store
    pub fn rm_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string()).map_err(|_| GitletError::NoSuchBranch)?;
        let target = self.refs_mut().delete_branch(&name)?;
        tracing::debug!(branch = %name, target = %target, "deleted branch");

        Ok(())
    }
}
