use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

/// Compares the working directory against the staging index and the head manifest
#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
    index: &'r Index,
    head: &'r Manifest,
}

impl<'r> Inspector<'r> {
    fn workspace_oid(&self, path: &str) -> anyhow::Result<ObjectId> {
        Ok(self.workspace.parse_blob(path)?.object_id())
    }

    /// Tracked files whose working copy no longer matches what would be committed
    ///
    /// Staged files are compared with their staged blob, everything else in the
    /// head manifest with the committed blob. Files staged for removal are skipped.
    pub fn workspace_changes(
        &self,
        files: &BTreeSet<String>,
    ) -> anyhow::Result<BTreeMap<String, WorkspaceChangeType>> {
        let mut changes = BTreeMap::new();

        let expected = self
            .index
            .tracked()
            .iter()
            .chain(
                self.head
                    .iter()
                    .filter(|(path, _)| !self.index.is_staged(path)),
            )
            .filter(|(path, _)| !self.index.is_removed(path));

        for (path, oid) in expected {
            if !files.contains(path) {
                changes.insert(path.clone(), WorkspaceChangeType::Deleted);
            } else if &self.workspace_oid(path)? != oid {
                changes.insert(path.clone(), WorkspaceChangeType::Modified);
            }
        }

        Ok(changes)
    }

    /// Working files the next commit would not contain
    ///
    /// A file is untracked when it is neither in the head manifest nor staged,
    /// or when it is staged for removal yet exists on disk again.
    pub fn untracked_files(
        &self,
        files: &BTreeSet<String>,
    ) -> anyhow::Result<BTreeMap<String, ObjectId>> {
        files
            .iter()
            .filter(|path| {
                self.index.is_removed(path)
                    || (!self.head.contains_key(*path) && !self.index.is_staged(path))
            })
            .map(|path| -> anyhow::Result<(String, ObjectId)> {
                Ok((path.clone(), self.workspace_oid(path)?))
            })
            .collect()
    }
}
