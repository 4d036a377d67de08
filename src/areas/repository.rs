//! Repository session
//!
//! One `Repository` lives for exactly one command: it is opened (snapshot
//! loaded under an exclusive lock), mutated by a porcelain command, then
//! persisted. Dropping it releases the lock.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::{METADATA_DIR, Workspace};
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::commit::{Commit, Manifest};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::session::lock::SessionLock;
use crate::artifacts::session::snapshot::Snapshot;
use anyhow::Context;
use fake::rand;
use std::cell::{RefCell, RefMut};
use std::io::Write;
use std::path::{Path, PathBuf};

const OBJECTS_DIR: &str = "objects";
const SESSION_FILE: &str = "session";
const LOCK_FILE: &str = "session.lock";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    database: Database,
    workspace: Workspace,
    session: Snapshot,
    _lock: SessionLock,
}

impl Repository {
    pub fn metadata_path(root: &Path) -> PathBuf {
        root.join(METADATA_DIR)
    }

    /// Load the repository rooted at `path`
    ///
    /// Fails with `NotInitialized` when there is no metadata directory.
    pub fn open(path: &Path, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let root = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let metadata_path = Self::metadata_path(&root);
        if !metadata_path.is_dir() {
            return Err(GitletError::NotInitialized.into());
        }

        let lock = SessionLock::acquire(&metadata_path.join(LOCK_FILE))?;

        let session_path = metadata_path.join(SESSION_FILE);
        let session_bytes = std::fs::read(&session_path).with_context(|| {
            format!("Unable to read session snapshot {}", session_path.display())
        })?;
        let session = Snapshot::deserialize(session_bytes.as_slice())?;
        tracing::debug!(
            head = %session.refs.head_branch(),
            commits = session.history.len(),
            "loaded session"
        );

        Ok(Self::assemble(root, writer, session, lock))
    }

    /// Lay out a fresh metadata directory holding `session`
    pub(crate) fn create(
        path: &Path,
        writer: Box<dyn Write>,
        session: Snapshot,
    ) -> anyhow::Result<Self> {
        let root = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;
        let metadata_path = Self::metadata_path(&root);

        std::fs::create_dir_all(metadata_path.join(OBJECTS_DIR)).with_context(|| {
            format!("Unable to create directory {}", metadata_path.display())
        })?;
        let lock = SessionLock::acquire(&metadata_path.join(LOCK_FILE))?;

        Ok(Self::assemble(root, writer, session, lock))
    }

    fn assemble(
        root: PathBuf,
        writer: Box<dyn Write>,
        session: Snapshot,
        lock: SessionLock,
    ) -> Self {
        let metadata_path = Self::metadata_path(&root);

        Repository {
            database: Database::new(metadata_path.join(OBJECTS_DIR).into_boxed_path()),
            workspace: Workspace::new(root.clone().into_boxed_path()),
            path: root.into_boxed_path(),
            writer: RefCell::new(writer),
            session,
            _lock: lock,
        }
    }

    /// Write the session snapshot back, replacing the previous one atomically
    pub fn persist(&self) -> anyhow::Result<()> {
        let metadata_path = Self::metadata_path(&self.path);
        let session_path = metadata_path.join(SESSION_FILE);
        let temp_path = metadata_path.join(format!("session-{}.tmp", rand::random::<u32>()));

        let content = self.session.serialize()?;
        std::fs::write(&temp_path, &content)
            .with_context(|| format!("Unable to write {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &session_path)
            .with_context(|| format!("Unable to replace {}", session_path.display()))?;

        self.writer().flush()?;
        tracing::debug!(bytes = content.len(), "persisted session");

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.session.refs
    }

    pub fn refs_mut(&mut self) -> &mut Refs {
        &mut self.session.refs
    }

    pub fn index(&self) -> &Index {
        &self.session.index
    }

    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.session.index
    }

    /// Recompute the index's modified and untracked views against the working directory
    pub fn refresh_index_views(&mut self, head: &Manifest) -> anyhow::Result<()> {
        self.session
            .index
            .recompute_modified(&self.workspace, head)?;
        self.session
            .index
            .recompute_untracked(&self.workspace, head)
    }

    /// Every commit ever created, oldest first
    pub fn history(&self) -> &[ObjectId] {
        &self.session.history
    }

    /// Append `oid` to the history unless an identical commit was recorded before
    pub(crate) fn record_commit(&mut self, oid: ObjectId) {
        if !self.session.history.contains(&oid) {
            self.session.history.push(oid);
        }
    }

    pub fn load_commit(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database.parse_object_as_commit(oid)
    }

    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.load_commit(self.refs().head_commit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::branch::DEFAULT_BRANCH;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository_dir() -> TempDir {
        TempDir::new().expect("Failed to create temp dir")
    }

    #[rstest]
    fn opening_outside_a_repository_fails(repository_dir: TempDir) {
        let err = Repository::open(repository_dir.path(), Box::new(std::io::sink()))
            .err()
            .expect("no repository to open");

        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::NotInitialized)
        );
    }

    #[rstest]
    fn persisted_session_is_loaded_back(repository_dir: TempDir) -> anyhow::Result<()> {
        let repository = Repository::init(repository_dir.path(), Box::new(std::io::sink()))?;
        repository.persist()?;
        let initial = repository.refs().head_commit().clone();
        drop(repository);

        let mut repository = Repository::open(repository_dir.path(), Box::new(std::io::sink()))?;
        assert_eq!(repository.refs().head_branch().as_ref(), DEFAULT_BRANCH);
        assert_eq!(repository.history(), &[initial.clone()]);
        assert!(repository.head_commit()?.manifest().is_empty());

        repository.branch("topic")?;
        repository.persist()?;
        drop(repository);

        let repository = Repository::open(repository_dir.path(), Box::new(std::io::sink()))?;
        assert_eq!(repository.refs().branches().len(), 2);
        assert!(
            std::fs::read_dir(Repository::metadata_path(repository.path()))?
                .filter_map(Result::ok)
                .all(|entry| !entry.file_name().to_string_lossy().ends_with(".tmp"))
        );
        Ok(())
    }
}
