use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::GitletError;
use crate::artifacts::merge::conflict::conflict_markers;
use crate::artifacts::merge::resolution::{Resolution, classify};
use crate::artifacts::merge::split_point::SplitPointFinder;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, Manifest};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    pub fn merge(&mut self, branch: &str) -> anyhow::Result<()> {
        if self.index().has_pending_changes() {
            return Err(GitletError::UncommittedChanges.into());
        }

        let name = BranchName::try_parse(branch.to_string()).map_err(|_| GitletError::NoSuchBranch)?;
        let given_oid = self
            .refs()
            .read_branch(&name)
            .cloned()
            .ok_or(GitletError::NoSuchBranch)?;
        if self.refs().is_head_branch(&name) {
            return Err(GitletError::MergeWithSelf.into());
        }

        let current_oid = self.refs().head_commit().clone();
        let current = self.load_commit(&current_oid)?;
        let given = self.load_commit(&given_oid)?;
        Migration::new(self, current.manifest(), given.manifest()).check_untracked_files()?;

        let split_oid = self.split_point(&current_oid, &given_oid)?;

        if split_oid.as_ref() == Some(&given_oid) {
            tracing::info!(branch = %name, "given branch already merged");
            writeln!(
                self.writer(),
                "Given branch is an ancestor of the current branch."
            )?;
            return Ok(());
        }

        if split_oid.as_ref() == Some(&current_oid) {
            let mut migration = Migration::new(self, current.manifest(), given.manifest());
            migration.apply_changes()?;

            let head_branch = self.refs().head_branch().clone();
            self.refs_mut().advance(&head_branch, given_oid.clone())?;
            self.index_mut().clear_all();

            tracing::info!(branch = %name, head = %given_oid.to_short_oid(), "fast-forwarded");
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let split = match &split_oid {
            Some(oid) => self.load_commit(oid)?,
            None => Commit::new(None, None, current.timestamp(), String::new(), Manifest::new()),
        };
        let conflicted = self.resolve_paths(split.manifest(), current.manifest(), given.manifest())?;

        let message = format!("Merged {} into {}.", name, self.refs().head_branch());
        let merge_oid = self.write_commit(Some(given_oid), message)?;
        tracing::info!(
            branch = %name,
            merge = %merge_oid.to_short_oid(),
            conflicts = conflicted,
            "merged"
        );

        if conflicted > 0 {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    fn split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let finder = SplitPointFinder::new(|oid: &ObjectId| {
            Ok(self.load_commit(oid)?.to_slim(oid.clone()))
        });

        finder.find_split_point(current, given)
    }

    /// Apply the three-way outcome of every path to the working directory and staging
    ///
    /// # Returns
    ///
    /// The number of conflicted paths
    fn resolve_paths(
        &mut self,
        split: &Manifest,
        current: &Manifest,
        given: &Manifest,
    ) -> anyhow::Result<usize> {
        let paths = split
            .keys()
            .chain(current.keys())
            .chain(given.keys())
            .cloned()
            .collect::<BTreeSet<_>>();
        let mut conflicted = 0;

        for path in paths {
            let resolution = classify(split.get(&path), current.get(&path), given.get(&path));
            tracing::debug!(path = %path, resolution = ?resolution, "resolved path");

            match resolution {
                Resolution::Unchanged | Resolution::KeepCurrent => {}
                Resolution::TakeGiven(blob_id) => {
                    let blob = self.database().parse_object_as_blob(&blob_id)?;
                    self.workspace().write_file(&path, blob.content())?;
                    self.index_mut().stage_add(path, blob_id);
                }
                Resolution::Delete => {
                    self.workspace().remove_file(&path)?;
                    self.index_mut().stage_remove(path);
                }
                Resolution::Conflict => {
                    let current_content = self.blob_content(current.get(&path))?;
                    let given_content = self.blob_content(given.get(&path))?;
                    let content =
                        conflict_markers(current_content.as_deref(), given_content.as_deref());

                    let blob = Blob::new(path.clone(), content);
                    let blob_id = self.database().store(&blob)?;
                    self.workspace().write_file(&path, blob.content())?;
                    self.index_mut().stage_add(path, blob_id);
                    conflicted += 1;
                }
            }
        }

        Ok(conflicted)
    }

    fn blob_content(&self, blob_id: Option<&ObjectId>) -> anyhow::Result<Option<Bytes>> {
        blob_id
            .map(|oid| -> anyhow::Result<Bytes> {
                Ok(self.database().parse_object_as_blob(oid)?.content().clone())
            })
            .transpose()
    }
}
