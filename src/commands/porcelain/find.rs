use crate::areas::repository::Repository;
use crate::artifacts::core::GitletError;
use std::io::Write;

impl Repository {
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for oid in self.history() {
            if self.load_commit(oid)?.message() == message {
                writeln!(self.writer(), "{oid}")?;
                found = true;
            }
        }

        if !found {
            return Err(GitletError::NoCommitWithMessage.into());
        }

        Ok(())
    }
}
