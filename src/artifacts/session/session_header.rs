use crate::artifacts::core::GitletError;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::session::{HEADER_SIZE, SECTION_COUNT, SIGNATURE, VERSION};
use byteorder::{ByteOrder, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SessionHeader {
    pub(crate) marker: String,
    pub(crate) version: u32,
    pub(crate) sections: u32,
}

impl SessionHeader {
    pub(crate) fn current() -> Self {
        SessionHeader::new(String::from(SIGNATURE), VERSION, SECTION_COUNT)
    }

    /// Reject snapshots written by another tool or format revision
    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        if self.marker != SIGNATURE {
            return Err(GitletError::CorruptSnapshot(format!(
                "invalid signature {:?}",
                self.marker
            ))
            .into());
        }
        if self.version != VERSION || self.sections != SECTION_COUNT {
            return Err(GitletError::CorruptSnapshot(format!(
                "unsupported format version {} with {} sections",
                self.version, self.sections
            ))
            .into());
        }

        Ok(())
    }
}

impl Packable for SessionHeader {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(self.marker.as_bytes())?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.version)?;
        bytes.write_u32::<byteorder::NetworkEndian>(self.sections)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for SessionHeader {
    fn deserialize(mut reader: impl BufRead) -> anyhow::Result<Self> {
        let mut bytes = [0u8; HEADER_SIZE];
        reader
            .read_exact(&mut bytes)
            .map_err(|_| GitletError::CorruptSnapshot("invalid header size".to_string()))?;

        let marker = String::from_utf8_lossy(&bytes[0..4]).into_owned();
        let version = byteorder::NetworkEndian::read_u32(&bytes[4..8]);
        let sections = byteorder::NetworkEndian::read_u32(&bytes[8..12]);

        Ok(SessionHeader {
            marker,
            version,
            sections,
        })
    }
}
