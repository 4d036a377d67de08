use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::repository::Repository;
use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::{Commit, load_timestamp_from_env};
use crate::artifacts::objects::object::Object;
use crate::artifacts::session::snapshot::Snapshot;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Create a repository at `path` holding only the initial commit on `master`
    pub fn init(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        if Self::metadata_path(path).exists() {
            return Err(GitletError::AlreadyInitialized.into());
        }

        let initial = Commit::initial(load_timestamp_from_env());
        let initial_id = initial.object_id();
        let session = Snapshot {
            refs: Refs::new(
                BranchName::try_parse(DEFAULT_BRANCH.to_string())?,
                initial_id.clone(),
            ),
            index: Index::new(),
            history: vec![initial_id],
        };

        let repository = Self::create(path, writer, session)?;
        repository.database().store(&initial)?;
        tracing::info!(path = %repository.path().display(), "initialized repository");

        Ok(repository)
    }
}
