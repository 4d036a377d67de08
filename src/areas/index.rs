//! Staging index
//!
//! The pending-change set consulted and cleared by `commit` and `merge`.
//!
//! ## Data Structures
//!
//! - `tracked`: files staged for addition (path to blob ID), ordered by path
//! - `removed`: files staged for removal
//! - `modified`: derived view of tracked files changed or deleted on disk
//! - `untracked`: derived view of working files the next commit would not contain
//!
//! A path is never in `tracked` and `removed` at the same time. The derived
//! views are only meaningful right after `recompute_modified` /
//! `recompute_untracked`; any filesystem change makes them stale.

use crate::areas::workspace::Workspace;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::Manifest;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    tracked: BTreeMap<String, ObjectId>,
    removed: BTreeSet<String>,
    modified: BTreeMap<String, WorkspaceChangeType>,
    untracked: BTreeMap<String, ObjectId>,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an index from persisted parts, rejecting overlapping stages
    pub fn from_parts(
        tracked: BTreeMap<String, ObjectId>,
        removed: BTreeSet<String>,
        modified: BTreeMap<String, WorkspaceChangeType>,
        untracked: BTreeMap<String, ObjectId>,
    ) -> anyhow::Result<Self> {
        if let Some(path) = removed.iter().find(|path| tracked.contains_key(*path)) {
            return Err(GitletError::CorruptSnapshot(format!(
                "{path} is staged for both addition and removal"
            ))
            .into());
        }

        Ok(Index {
            tracked,
            removed,
            modified,
            untracked,
        })
    }

    pub fn tracked(&self) -> &BTreeMap<String, ObjectId> {
        &self.tracked
    }

    pub fn removed(&self) -> &BTreeSet<String> {
        &self.removed
    }

    pub fn modified(&self) -> &BTreeMap<String, WorkspaceChangeType> {
        &self.modified
    }

    pub fn untracked(&self) -> &BTreeMap<String, ObjectId> {
        &self.untracked
    }

    pub fn is_staged(&self, path: &str) -> bool {
        self.tracked.contains_key(path)
    }

    pub fn is_removed(&self, path: &str) -> bool {
        self.removed.contains(path)
    }

    /// Whether a commit would record anything
    pub fn has_pending_changes(&self) -> bool {
        !self.tracked.is_empty() || !self.removed.is_empty()
    }

    pub fn stage_add(&mut self, path: String, oid: ObjectId) {
        self.removed.remove(&path);
        self.tracked.insert(path, oid);
    }

    pub fn stage_remove(&mut self, path: String) {
        self.tracked.remove(&path);
        self.removed.insert(path);
    }

    /// Drop any pending addition or removal of `path`
    ///
    /// # Returns
    ///
    /// Whether anything was staged for the path
    pub fn unstage(&mut self, path: &str) -> bool {
        let was_tracked = self.tracked.remove(path).is_some();
        let was_removed = self.removed.remove(path);

        was_tracked || was_removed
    }

    /// Forget pending additions and removals, keeping the derived views
    pub fn clear_staged(&mut self) {
        self.tracked.clear();
        self.removed.clear();
    }

    /// Forget pending additions only; staged removals survive
    pub fn clear_tracked(&mut self) {
        self.tracked.clear();
    }

    pub fn clear_all(&mut self) {
        self.clear_staged();
        self.modified.clear();
        self.untracked.clear();
    }

    /// The manifest the next commit would record on top of `base`
    pub fn apply_to(&self, base: &Manifest) -> Manifest {
        let mut manifest = base.clone();

        manifest.extend(
            self.tracked
                .iter()
                .map(|(path, oid)| (path.clone(), oid.clone())),
        );
        manifest.retain(|path, _| !self.removed.contains(path));

        manifest
    }

    pub fn recompute_modified(
        &mut self,
        workspace: &Workspace,
        head: &Manifest,
    ) -> anyhow::Result<()> {
        let files = workspace.list_files()?;
        let modified = Inspector::new(workspace, self, head).workspace_changes(&files)?;
        self.modified = modified;

        Ok(())
    }

    pub fn recompute_untracked(
        &mut self,
        workspace: &Workspace,
        head: &Manifest,
    ) -> anyhow::Result<()> {
        let files = workspace.list_files()?;
        let untracked = Inspector::new(workspace, self, head).untracked_files(&files)?;
        self.untracked = untracked;

        Ok(())
    }
}
