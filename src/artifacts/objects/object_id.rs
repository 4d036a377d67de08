//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character hexadecimal strings. They name every blob and
//! commit in the object store, which keeps them in one flat directory:
//! `.gitlet/objects/<40-hex-chars>`.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc123d"), used by `log` for merge parents

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use sha1::{Digest, Sha1};
use std::io;

/// Object identifier (SHA-1 digest)
///
/// A 40-character hexadecimal string that uniquely identifies an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Hash arbitrary bytes into an object ID
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// Write the 20 raw digest bytes, as the session snapshot stores them
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let raw = self
            .0
            .as_bytes()
            .chunks(2)
            .map(|pair| {
                std::str::from_utf8(pair)
                    .ok()
                    .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                    .ok_or_else(|| anyhow::anyhow!("Object ID {} is not hex", self.0))
            })
            .collect::<anyhow::Result<Vec<u8>>>()?;

        writer.write_all(&raw)?;
        Ok(())
    }

    /// Read 20 raw digest bytes back into an object ID
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> anyhow::Result<Self> {
        let mut raw = [0u8; OBJECT_ID_LENGTH / 2];
        reader.read_exact(&mut raw)?;

        let hex40 = raw.iter().map(|byte| format!("{byte:02x}")).collect::<String>();
        Self::try_parse(hex40)
    }

    /// Whether this ID starts with the given (already lowercased) hex prefix
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Get abbreviated form of the object ID
    ///
    /// # Returns
    ///
    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")]
    fn rejects_malformed_ids(#[case] id: &str) {
        assert!(ObjectId::try_parse(id.to_string()).is_err());
    }

    #[test]
    fn digest_matches_known_sha1() {
        let oid = ObjectId::digest(b"hello");

        assert_eq!(oid.as_ref(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
        assert_eq!(oid.to_short_oid(), "aaf4c61");
    }

    #[test]
    fn binary_form_preserves_the_id() -> anyhow::Result<()> {
        let oid = ObjectId::digest(b"binary form");
        let mut buffer = Vec::new();
        oid.write_h40_to(&mut buffer)?;

        assert_eq!(buffer.len(), OBJECT_ID_LENGTH / 2);
        assert_eq!(ObjectId::read_h40_from(&mut buffer.as_slice())?, oid);
        Ok(())
    }
}
