//! Manifest transition
//!
//! Moves the working directory from one commit's manifest to another's:
//!
//! 1. Safety check: refuse when a file the target introduces already exists
//!    on disk and the user never staged it, or when a target path collides
//!    with untracked files through a directory
//! 2. Deletion pass: remove files tracked in the source but not the target
//! 3. Write pass: write every file of the target from the object store
//!
//! `checkout <branch>`, `reset <commit>` and fast-forward merges all run
//! through here and only differ in which pointer moves afterwards.

use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::BTreeSet;

pub struct Migration<'r> {
    repository: &'r Repository,
    from: &'r Manifest,
    to: &'r Manifest,
    /// Files to delete from the working directory
    deletions: BTreeSet<String>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, from: &'r Manifest, to: &'r Manifest) -> Self {
        Self {
            repository,
            from,
            to,
            deletions: BTreeSet::new(),
        }
    }

    pub fn deletions(&self) -> &BTreeSet<String> {
        &self.deletions
    }

    pub fn writes(&self) -> &Manifest {
        self.to
    }

    pub fn load_blob(&self, blob_id: &ObjectId) -> anyhow::Result<Blob> {
        self.repository.database().parse_object_as_blob(blob_id)
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.check_untracked_files()?;
        self.plan_changes();

        tracing::debug!(
            deletions = self.deletions.len(),
            writes = self.to.len(),
            "applying manifest transition"
        );
        self.repository.workspace().apply_migration(self)
    }

    /// Fail with `UntrackedFileConflict` if the transition would overwrite a file
    /// the repository knows nothing about
    pub fn check_untracked_files(&self) -> anyhow::Result<()> {
        let files = self.repository.workspace().list_files()?;
        let index = self.repository.index();

        let blocked = self
            .to
            .keys()
            .filter(|path| {
                let file_in_the_way = !self.from.contains_key(*path)
                    && files.contains(*path)
                    && !index.is_staged(path);

                file_in_the_way
                    || self.untracked_below(path, &files)
                    || self.untracked_above(path, &files)
            })
            .collect::<Vec<_>>();

        if blocked.is_empty() {
            return Ok(());
        }

        for path in &blocked {
            tracing::warn!(path = %path, "untracked working file would be overwritten");
        }
        Err(GitletError::UntrackedFileConflict.into())
    }

    /// Whether `path` is a directory on disk holding files the source commit does not track
    fn untracked_below(&self, path: &str, files: &BTreeSet<String>) -> bool {
        let prefix = format!("{path}/");

        files
            .range(prefix.clone()..)
            .take_while(|file| file.starts_with(&prefix))
            .any(|file| !self.from.contains_key(file))
    }

    /// Whether a parent directory of `path` is taken by an untracked file
    fn untracked_above(&self, path: &str, files: &BTreeSet<String>) -> bool {
        path.match_indices('/')
            .map(|(at, _)| &path[..at])
            .any(|parent| files.contains(parent) && !self.from.contains_key(parent))
    }

    fn plan_changes(&mut self) {
        self.deletions = self
            .from
            .keys()
            .filter(|path| !self.to.contains_key(*path))
            .cloned()
            .collect();
    }
}
