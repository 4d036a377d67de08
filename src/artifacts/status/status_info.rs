use crate::areas::index::Index;
use crate::areas::refs::Refs;
use derive_new::new;
use std::fmt;

/// The five-section report printed by `status`
///
/// Expects the index's derived views to have been recomputed just before.
#[derive(new)]
pub struct StatusReport<'r> {
    refs: &'r Refs,
    index: &'r Index,
}

impl StatusReport<'_> {
    fn write_section<I, S>(f: &mut fmt::Formatter<'_>, title: &str, entries: I) -> fmt::Result
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        writeln!(f, "=== {title} ===")?;
        for entry in entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for StatusReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let branches = self.refs.branches().keys().map(|name| {
            if self.refs.is_head_branch(name) {
                format!("*{name}")
            } else {
                name.to_string()
            }
        });
        Self::write_section(f, "Branches", branches)?;

        Self::write_section(f, "Staged Files", self.index.tracked().keys())?;
        Self::write_section(f, "Removed Files", self.index.removed())?;

        let modifications = self
            .index
            .modified()
            .iter()
            .map(|(path, change)| format!("{path} ({change})"));
        Self::write_section(f, "Modifications Not Staged For Commit", modifications)?;

        Self::write_section(f, "Untracked Files", self.index.untracked().keys())
    }
}
