//! Branch/ref table
//!
//! An ordered mapping from branch name to the commit it points at, plus the
//! active branch. `head_commit` is a cached copy of the active branch's
//! target and is kept in step on every mutation.
//!
//! The table lives in memory for the duration of one command and is
//! persisted as part of the session snapshot.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refs {
    branches: BTreeMap<BranchName, ObjectId>,
    head_branch: BranchName,
    head_commit: ObjectId,
}

impl Refs {
    /// A table holding a single branch, which is also the active one
    pub fn new(head_branch: BranchName, head_commit: ObjectId) -> Self {
        Refs {
            branches: BTreeMap::from([(head_branch.clone(), head_commit.clone())]),
            head_branch,
            head_commit,
        }
    }

    /// Rebuild a table from persisted parts, checking that the head branch exists
    pub fn from_parts(
        branches: BTreeMap<BranchName, ObjectId>,
        head_branch: BranchName,
    ) -> anyhow::Result<Self> {
        let head_commit = branches
            .get(&head_branch)
            .cloned()
            .ok_or_else(|| {
                GitletError::CorruptSnapshot(format!("head branch {head_branch} has no target"))
            })?;

        Ok(Refs {
            branches,
            head_branch,
            head_commit,
        })
    }

    pub fn head_branch(&self) -> &BranchName {
        &self.head_branch
    }

    pub fn head_commit(&self) -> &ObjectId {
        &self.head_commit
    }

    pub fn branches(&self) -> &BTreeMap<BranchName, ObjectId> {
        &self.branches
    }

    pub fn read_branch(&self, name: &BranchName) -> Option<&ObjectId> {
        self.branches.get(name)
    }

    pub fn is_head_branch(&self, name: &BranchName) -> bool {
        &self.head_branch == name
    }

    /// Create a branch pointing at the current head commit
    pub fn create_branch(&mut self, name: BranchName) -> anyhow::Result<()> {
        if self.branches.contains_key(&name) {
            return Err(GitletError::BranchExists.into());
        }

        tracing::debug!(branch = %name, target = %self.head_commit, "creating branch");
        self.branches.insert(name, self.head_commit.clone());

        Ok(())
    }

    pub fn delete_branch(&mut self, name: &BranchName) -> anyhow::Result<ObjectId> {
        if !self.branches.contains_key(name) {
            return Err(GitletError::NoSuchBranch.into());
        }
        if self.is_head_branch(name) {
            return Err(GitletError::CannotDeleteCurrent.into());
        }

        self.branches
            .remove(name)
            .ok_or_else(|| GitletError::NoSuchBranch.into())
    }

    /// Point `name` at `commit`, moving the head commit too when `name` is active
    pub fn advance(&mut self, name: &BranchName, commit: ObjectId) -> anyhow::Result<()> {
        let target = self
            .branches
            .get_mut(name)
            .ok_or(GitletError::NoSuchBranch)?;
        *target = commit.clone();

        if self.is_head_branch(name) {
            self.head_commit = commit;
        }

        Ok(())
    }

    /// Make `name` the active branch
    pub fn set_head(&mut self, name: &BranchName) -> anyhow::Result<()> {
        let target = self
            .branches
            .get(name)
            .cloned()
            .ok_or(GitletError::NoSuchBranch)?;

        self.head_branch = name.clone();
        self.head_commit = target;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn branch(name: &str) -> BranchName {
        BranchName::try_parse(name.to_string()).expect("valid test branch")
    }

    #[fixture]
    fn refs() -> Refs {
        let mut refs = Refs::new(branch("master"), ObjectId::digest(b"root"));
        refs.create_branch(branch("feature"))
            .expect("fresh branch name");
        refs
    }

    fn user_error(result: anyhow::Result<impl std::fmt::Debug>) -> GitletError {
        result
            .expect_err("operation must fail")
            .downcast::<GitletError>()
            .expect("user error")
    }

    #[rstest]
    fn new_branch_points_at_head(refs: Refs) {
        assert_eq!(refs.read_branch(&branch("feature")), Some(refs.head_commit()));
        assert_eq!(refs.head_branch(), &branch("master"));
    }

    #[rstest]
    fn duplicate_branch_is_rejected(mut refs: Refs) {
        assert_eq!(
            user_error(refs.create_branch(branch("feature"))),
            GitletError::BranchExists
        );
    }

    #[rstest]
    fn deleting_the_active_or_unknown_branch_fails(mut refs: Refs) {
        assert_eq!(
            user_error(refs.delete_branch(&branch("master"))),
            GitletError::CannotDeleteCurrent
        );
        assert_eq!(
            user_error(refs.delete_branch(&branch("ghost"))),
            GitletError::NoSuchBranch
        );
    }

    #[rstest]
    fn advancing_the_active_branch_moves_head(mut refs: Refs) -> anyhow::Result<()> {
        let next = ObjectId::digest(b"next");
        refs.advance(&branch("master"), next.clone())?;

        assert_eq!(refs.head_commit(), &next);
        assert_eq!(refs.read_branch(&branch("master")), Some(&next));
        Ok(())
    }

    #[rstest]
    fn advancing_another_branch_leaves_head(mut refs: Refs) -> anyhow::Result<()> {
        let root = refs.head_commit().clone();
        refs.advance(&branch("feature"), ObjectId::digest(b"side"))?;

        assert_eq!(refs.head_commit(), &root);
        Ok(())
    }

    #[rstest]
    fn switching_head_follows_the_branch_target(mut refs: Refs) -> anyhow::Result<()> {
        let side = ObjectId::digest(b"side");
        refs.advance(&branch("feature"), side.clone())?;
        refs.set_head(&branch("feature"))?;

        assert!(refs.is_head_branch(&branch("feature")));
        assert_eq!(refs.head_commit(), &side);
        refs.delete_branch(&branch("master"))?;
        assert_eq!(refs.branches().len(), 1);
        Ok(())
    }
}
