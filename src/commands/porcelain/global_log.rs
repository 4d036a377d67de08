use crate::areas::repository::Repository;

impl Repository {
    /// Print every commit ever made, in creation order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for oid in self.history() {
            let commit = self.load_commit(oid)?;
            self.display_commit(oid, &commit)?;
        }

        Ok(())
    }
}
