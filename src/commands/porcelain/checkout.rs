use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::object_id::ObjectId;

/// The three shapes `checkout` accepts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutRequest {
    /// `checkout -- <path>`
    HeadFile { path: String },
    /// `checkout <commit> -- <path>`
    CommitFile { commit: String, path: String },
    /// `checkout <branch>`
    Branch { name: String },
}

impl Repository {
    pub fn checkout(&mut self, request: CheckoutRequest) -> anyhow::Result<()> {
        match request {
            CheckoutRequest::HeadFile { path } => {
                let head = self.refs().head_commit().clone();
                self.checkout_file(&head, &path)
            }
            CheckoutRequest::CommitFile { commit, path } => {
                let commit = Revision::new(&commit).resolve(self.history())?;
                self.checkout_file(&commit, &path)
            }
            CheckoutRequest::Branch { name } => self.checkout_branch(&name),
        }
    }

    /// Overwrite one working file with its version in `commit_oid`
    ///
    /// Staging is left untouched.
    fn checkout_file(&self, commit_oid: &ObjectId, path: &str) -> anyhow::Result<()> {
        let path = Workspace::normalize(path)?;
        let commit = self.load_commit(commit_oid)?;
        let blob_id = commit
            .blob_id(&path)
            .ok_or(GitletError::FileNotInCommit)?;

        let blob = self.database().parse_object_as_blob(blob_id)?;
        self.workspace().write_file(&path, blob.content())
    }

    fn checkout_branch(&mut self, name: &str) -> anyhow::Result<()> {
        let name = BranchName::try_parse(name.to_string()).map_err(|_| GitletError::NoSuchBranch)?;
        let target_oid = self
            .refs()
            .read_branch(&name)
            .cloned()
            .ok_or(GitletError::NoSuchBranch)?;
        if self.refs().is_head_branch(&name) {
            return Err(GitletError::AlreadyOnBranch.into());
        }

        let head = self.head_commit()?;
        let target = self.load_commit(&target_oid)?;
        let mut migration = Migration::new(self, head.manifest(), target.manifest());
        migration.apply_changes()?;

        self.refs_mut().set_head(&name)?;
        self.index_mut().clear_all();
        tracing::info!(branch = %name, head = %target_oid.to_short_oid(), "switched branch");

        Ok(())
    }
}
