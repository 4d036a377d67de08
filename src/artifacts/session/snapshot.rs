use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::GitletError;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::session::checksum::Checksum;
use crate::artifacts::session::session_header::SessionHeader;
use crate::artifacts::session::{HEADER_SIZE, OID_SIZE};
use crate::artifacts::status::file_change::WorkspaceChangeType;
use byteorder::{ByteOrder, NetworkEndian};
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;

/// Everything one invocation loads at start and writes back at the end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub refs: Refs,
    pub index: Index,
    /// Every commit ever created, in creation order
    pub history: Vec<ObjectId>,
}

type Writer = Checksum<Vec<u8>>;

fn write_u32(writer: &mut Writer, value: usize) -> anyhow::Result<()> {
    let value = u32::try_from(value)?;
    let mut bytes = [0u8; 4];
    NetworkEndian::write_u32(&mut bytes, value);
    writer.write(&bytes)
}

fn write_str(writer: &mut Writer, value: &str) -> anyhow::Result<()> {
    write_u32(writer, value.len())?;
    writer.write(value.as_bytes())
}

fn write_oid(writer: &mut Writer, oid: &ObjectId) -> anyhow::Result<()> {
    let mut bytes = Vec::with_capacity(OID_SIZE);
    oid.write_h40_to(&mut bytes)?;
    writer.write(&bytes)
}

fn read_u32<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<usize> {
    let bytes = reader.read(4)?;
    Ok(NetworkEndian::read_u32(&bytes) as usize)
}

fn read_str<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<String> {
    let len = read_u32(reader)?;
    let bytes = reader.read(len)?;

    String::from_utf8(bytes.to_vec())
        .map_err(|_| GitletError::CorruptSnapshot("path is not UTF-8".to_string()).into())
}

fn read_oid<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<ObjectId> {
    let bytes = reader.read(OID_SIZE)?;
    ObjectId::read_h40_from(&mut bytes.as_ref())
}

fn read_branch<R: Read>(reader: &mut Checksum<R>) -> anyhow::Result<BranchName> {
    let name = read_str(reader)?;
    BranchName::try_parse(name.clone())
        .map_err(|_| GitletError::CorruptSnapshot(format!("invalid branch name {name:?}")).into())
}

impl Packable for Snapshot {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut writer = Checksum::new(Vec::new());
        writer.write(&SessionHeader::current().serialize()?)?;

        // head
        write_str(&mut writer, self.refs.head_branch().as_ref())?;
        write_oid(&mut writer, self.refs.head_commit())?;

        // branches
        write_u32(&mut writer, self.refs.branches().len())?;
        for (name, target) in self.refs.branches() {
            write_str(&mut writer, name.as_ref())?;
            write_oid(&mut writer, target)?;
        }

        // tracked
        write_u32(&mut writer, self.index.tracked().len())?;
        for (path, oid) in self.index.tracked() {
            write_str(&mut writer, path)?;
            write_oid(&mut writer, oid)?;
        }

        // removed
        write_u32(&mut writer, self.index.removed().len())?;
        for path in self.index.removed() {
            write_str(&mut writer, path)?;
        }

        // modified
        write_u32(&mut writer, self.index.modified().len())?;
        for (path, change) in self.index.modified() {
            write_str(&mut writer, path)?;
            writer.write(&[change.as_tag()])?;
        }

        // untracked
        write_u32(&mut writer, self.index.untracked().len())?;
        for (path, oid) in self.index.untracked() {
            write_str(&mut writer, path)?;
            write_oid(&mut writer, oid)?;
        }

        // history
        write_u32(&mut writer, self.history.len())?;
        for oid in &self.history {
            write_oid(&mut writer, oid)?;
        }

        Ok(Bytes::from(writer.write_checksum()?))
    }
}

impl Unpackable for Snapshot {
    fn deserialize(reader: impl std::io::BufRead) -> anyhow::Result<Self> {
        let mut reader = Checksum::new(reader);

        let header = SessionHeader::deserialize(reader.read(HEADER_SIZE)?.as_ref())?;
        header.validate()?;

        let head_branch = read_branch(&mut reader)?;
        let head_commit = read_oid(&mut reader)?;

        let mut branches = BTreeMap::new();
        for _ in 0..read_u32(&mut reader)? {
            let name = read_branch(&mut reader)?;
            branches.insert(name, read_oid(&mut reader)?);
        }

        let mut tracked = BTreeMap::new();
        for _ in 0..read_u32(&mut reader)? {
            let path = read_str(&mut reader)?;
            tracked.insert(path, read_oid(&mut reader)?);
        }

        let mut removed = BTreeSet::new();
        for _ in 0..read_u32(&mut reader)? {
            removed.insert(read_str(&mut reader)?);
        }

        let mut modified = BTreeMap::new();
        for _ in 0..read_u32(&mut reader)? {
            let path = read_str(&mut reader)?;
            let change = WorkspaceChangeType::try_from(reader.read(1)?[0])
                .map_err(|err| GitletError::CorruptSnapshot(err.to_string()))?;
            modified.insert(path, change);
        }

        let mut untracked = BTreeMap::new();
        for _ in 0..read_u32(&mut reader)? {
            let path = read_str(&mut reader)?;
            untracked.insert(path, read_oid(&mut reader)?);
        }

        let mut history = Vec::new();
        for _ in 0..read_u32(&mut reader)? {
            history.push(read_oid(&mut reader)?);
        }

        reader.verify()?;

        let refs = Refs::from_parts(branches, head_branch)?;
        if refs.head_commit() != &head_commit {
            return Err(GitletError::CorruptSnapshot(format!(
                "head commit {head_commit} disagrees with branch {}",
                refs.head_branch()
            ))
            .into());
        }

        Ok(Snapshot {
            refs,
            index: Index::from_parts(tracked, removed, modified, untracked)?,
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn snapshot() -> Snapshot {
        let root = ObjectId::digest(b"root");
        let tip = ObjectId::digest(b"tip");
        let master = BranchName::try_parse("master".to_string()).expect("valid branch");
        let feature = BranchName::try_parse("feature/x".to_string()).expect("valid branch");

        let refs = Refs::from_parts(
            BTreeMap::from([(master.clone(), tip.clone()), (feature, root.clone())]),
            master,
        )
        .expect("head branch exists");
        let index = Index::from_parts(
            BTreeMap::from([("dir/a.txt".to_string(), ObjectId::digest(b"a"))]),
            BTreeSet::from(["b.txt".to_string()]),
            BTreeMap::from([("c.txt".to_string(), WorkspaceChangeType::Deleted)]),
            BTreeMap::from([("d.txt".to_string(), ObjectId::digest(b"d"))]),
        )
        .expect("disjoint stages");

        Snapshot {
            refs,
            index,
            history: vec![root, tip],
        }
    }

    #[rstest]
    fn snapshot_survives_persistence(snapshot: Snapshot) -> anyhow::Result<()> {
        let bytes = snapshot.serialize()?;

        assert_eq!(&bytes[..4], b"GLET");
        assert_eq!(Snapshot::deserialize(bytes.as_ref())?, snapshot);
        Ok(())
    }

    #[rstest]
    fn flipped_byte_fails_the_checksum(snapshot: Snapshot) -> anyhow::Result<()> {
        let mut bytes = snapshot.serialize()?.to_vec();
        let last_payload_byte = bytes.len() - 21;
        bytes[last_payload_byte] ^= 0xff;

        let err = Snapshot::deserialize(bytes.as_slice()).expect_err("corruption detected");

        assert!(matches!(
            err.downcast_ref::<GitletError>(),
            Some(GitletError::CorruptSnapshot(_))
        ));
        Ok(())
    }

    #[rstest]
    fn truncated_snapshot_is_corrupt(snapshot: Snapshot) -> anyhow::Result<()> {
        let bytes = snapshot.serialize()?;

        assert!(Snapshot::deserialize(&bytes[..bytes.len() / 2]).is_err());
        Ok(())
    }
}
