use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusReport;
use std::io::Write;

impl Repository {
    pub fn status(&mut self) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        self.refresh_index_views(head.manifest())?;

        write!(
            self.writer(),
            "{}",
            StatusReport::new(self.refs(), self.index())
        )?;

        Ok(())
    }
}
