use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a branch at the head commit without switching to it
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string())?;
        self.refs_mut().create_branch(name)
    }
}
