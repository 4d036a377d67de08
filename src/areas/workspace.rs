use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the repository metadata directory, never listed as working files
pub const METADATA_DIR: &str = ".gitlet";

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Normalize a user-supplied path to the `/`-separated form used as a manifest key
    ///
    /// Paths with a `..` component are rejected with `OutsideRepository`.
    pub fn normalize(file_path: &str) -> anyhow::Result<String> {
        let components = file_path
            .split(['/', '\\'])
            .filter(|component| !component.is_empty() && *component != ".")
            .collect::<Vec<_>>();
        if components.contains(&"..") {
            return Err(GitletError::OutsideRepository.into());
        }

        Ok(components.join("/"))
    }

    /// Every plain file below the root, as `/`-separated relative paths
    pub fn list_files(&self) -> anyhow::Result<BTreeSet<String>> {
        let mut files = BTreeSet::new();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR);

        for entry in walker {
            let entry = entry.context("Unable to walk the working directory")?;
            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(relative) = self.to_relative(entry.path()) {
                files.insert(relative);
            }
        }

        Ok(files)
    }

    fn to_relative(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.path.as_ref()).ok()?;
        let components = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>();

        Some(components.join("/"))
    }

    fn absolute(&self, file_path: &str) -> PathBuf {
        self.path.join(file_path)
    }

    pub fn exists(&self, file_path: &str) -> bool {
        self.absolute(file_path).is_file()
    }

    pub fn read_file(&self, file_path: &str) -> anyhow::Result<Bytes> {
        let content = std::fs::read(self.absolute(file_path))
            .with_context(|| format!("Failed to read file: {file_path:?}"))?;

        Ok(Bytes::from(content))
    }

    pub fn parse_blob(&self, file_path: &str) -> anyhow::Result<Blob> {
        let data = self.read_file(file_path)?;
        Ok(Blob::new(file_path.to_string(), data))
    }

    /// Overwrite a file, creating missing parent directories
    pub fn write_file(&self, file_path: &str, data: &[u8]) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create parent directory of {file_path:?}"))?;
        }
        if path.is_dir() {
            if Self::holds_files(&path) {
                return Err(GitletError::UntrackedFileConflict.into());
            }
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove existing directory: {file_path:?}"))?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open file: {file_path:?}"))?;

        file.write_all(data)
            .with_context(|| format!("Failed to write to file: {file_path:?}"))?;

        Ok(())
    }

    fn holds_files(dir: &Path) -> bool {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(Result::ok)
            .any(|entry| entry.file_type().is_file())
    }

    /// Delete a file if present, then prune parent directories left empty
    pub fn remove_file(&self, file_path: &str) -> anyhow::Result<()> {
        let path = self.absolute(file_path);

        if path.is_file() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove file: {file_path:?}"))?;
        }

        self.prune_empty_parent_dirs(&path)
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        let mut current = path.parent();

        while let Some(dir) = current {
            if dir == self.path.as_ref() || !dir.starts_with(self.path.as_ref()) {
                break;
            }

            let is_empty = match std::fs::read_dir(dir) {
                Ok(mut entries) => entries.next().is_none(),
                Err(_) => break,
            };
            if !is_empty {
                break;
            }

            std::fs::remove_dir(dir)
                .with_context(|| format!("Failed to remove empty directory: {dir:?}"))?;
            current = dir.parent();
        }

        Ok(())
    }

    // Deletions run before writes so a path that changes from file to
    // directory (or back) between commits can be materialized.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for file_path in migration.deletions() {
            self.remove_file(file_path)?;
        }

        for (file_path, blob_id) in migration.writes() {
            let blob = migration.load_blob(blob_id)?;
            self.write_file(file_path, blob.content())?;
        }

        Ok(())
    }
}
