use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::{BufRead, Write};

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Bytes the object's identity is derived from.
    ///
    /// This is not the serialized form: a blob is named by its path and
    /// content, a commit by its parents, timestamp, message and manifest.
    fn identity(&self) -> Bytes;

    fn object_id(&self) -> ObjectId {
        ObjectId::digest(&self.identity())
    }
}

/// Frame a payload as `<type> <size>\0<payload>`
pub fn frame(object_type: ObjectType, payload: &[u8]) -> Result<Bytes> {
    let mut object_bytes = Vec::with_capacity(payload.len() + 16);
    let header = format!("{} {}\0", object_type.as_str(), payload.len());
    object_bytes.write_all(header.as_bytes())?;
    object_bytes.write_all(payload)?;

    Ok(Bytes::from(object_bytes))
}
