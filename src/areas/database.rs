//! Object store
//!
//! Content-addressed storage for blobs and commits in one flat directory,
//! one file per object named by its ID. Objects are never rewritten or deleted.

use crate::artifacts::core::GitletError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.object_path(object_id).is_file()
    }

    /// Raw framed bytes of an object
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.object_path(object_id);
        if !object_path.is_file() {
            return Err(GitletError::ObjectNotFound(object_id.clone()).into());
        }

        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Ok(object_content.into())
    }

    /// Persist an object unless one with the same ID is already stored
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id();
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, "object already stored");
        } else {
            self.write_object(&object_path, object.serialize()?)?;
            tracing::debug!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader),
            other => anyhow::bail!("object {object_id} is a {other}, not a blob"),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader),
            other => anyhow::bail!("object {object_id} is a {other}, not a commit"),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let content_len = object_content.len();
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)
            .context(format!("Unable to parse header of object {object_id}"))?;

        let payload_len = content_len - object_reader.position() as usize;
        if payload_len != size {
            anyhow::bail!("object {object_id} holds {payload_len} bytes, header says {size}");
        }

        Ok((object_type, object_reader))
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.as_ref())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> anyhow::Result<()> {
        let temp_object_path = self.path.join(Self::generate_temp_name());

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
