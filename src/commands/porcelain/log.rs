use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Print the first-parent chain from the head commit, newest first
    pub fn log(&self) -> anyhow::Result<()> {
        let mut curr_commit_oid = Some(self.refs().head_commit().clone());

        while let Some(commit_oid) = curr_commit_oid {
            let commit = self.load_commit(&commit_oid)?;
            self.display_commit(&commit_oid, &commit)?;

            curr_commit_oid = commit.parent().cloned();
        }

        Ok(())
    }

    pub fn display_commit(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        writeln!(self.writer(), "===")?;
        writeln!(self.writer(), "commit {oid}")?;
        if let (Some(parent), Some(merge_parent)) = (commit.parent(), commit.merge_parent()) {
            writeln!(
                self.writer(),
                "Merge: {} {}",
                parent.to_short_oid(),
                merge_parent.to_short_oid()
            )?;
        }
        writeln!(self.writer(), "Date: {}", commit.readable_timestamp())?;
        writeln!(self.writer(), "{}", commit.message())?;
        writeln!(self.writer())?;

        Ok(())
    }
}
