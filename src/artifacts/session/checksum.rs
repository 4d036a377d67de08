use crate::artifacts::core::GitletError;
use crate::artifacts::session::CHECKSUM_SIZE;
use anyhow::anyhow;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{Read, Write};

/// SHA-1 accumulator wrapped around a snapshot reader or writer
///
/// Every byte read or written goes through the digest, so the trailer can be
/// produced (or verified) once the payload is done.
#[derive(Debug)]
pub struct Checksum<T> {
    inner: T,
    digest: Sha1,
}

impl<T> Checksum<T> {
    pub(crate) fn new(inner: T) -> Self {
        Checksum {
            inner,
            digest: Sha1::new(),
        }
    }
}

impl<R: Read> Checksum<R> {
    pub(crate) fn read(&mut self, size: usize) -> anyhow::Result<Bytes> {
        // a corrupt length must not turn into a huge allocation
        let mut buffer = Vec::new();
        self.inner
            .by_ref()
            .take(size as u64)
            .read_to_end(&mut buffer)?;
        if buffer.len() != size {
            return Err(GitletError::CorruptSnapshot("unexpected end of file".to_string()).into());
        }

        self.digest.update(&buffer);
        Ok(Bytes::from(buffer))
    }

    pub(crate) fn verify(&mut self) -> anyhow::Result<()> {
        let mut expected_checksum = [0u8; CHECKSUM_SIZE];
        self.inner
            .read_exact(&mut expected_checksum)
            .map_err(|_| GitletError::CorruptSnapshot("missing checksum".to_string()))?;

        let actual_checksum = self.digest.clone().finalize();

        if expected_checksum != actual_checksum.as_slice() {
            return Err(GitletError::CorruptSnapshot(
                "checksum does not match value stored on disk".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl<W: Write> Checksum<W> {
    pub(crate) fn write(&mut self, data: &[u8]) -> anyhow::Result<()> {
        self.inner.write_all(data)?;
        self.digest.update(data);
        Ok(())
    }

    /// Append the trailer and hand back the underlying writer
    pub(crate) fn write_checksum(mut self) -> anyhow::Result<W> {
        let checksum = self.digest.clone().finalize();
        self.inner
            .write_all(checksum.as_slice())
            .map_err(|_| anyhow!("Failed to write checksum to session snapshot"))?;

        Ok(self.inner)
    }
}
