//! Commit ID prefix resolution
//!
//! `checkout <commit> -- <path>` and `reset <commit>` accept any unique prefix
//! of a commit ID. Candidates come from the session's commit-id history, not
//! from scanning the object store, so blobs can never match.

use crate::artifacts::core::GitletError;
use crate::artifacts::objects::object_id::ObjectId;

/// A user-supplied, possibly abbreviated, commit ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revision(String);

impl Revision {
    pub fn new(prefix: &str) -> Self {
        Revision(prefix.trim().to_ascii_lowercase())
    }

    /// Resolve the prefix against the commit-id history
    ///
    /// Fails with `CommitNotFound` when nothing matches (or the input is not
    /// hex) and with `AmbiguousCommitId` when more than one commit matches.
    pub fn resolve(&self, history: &[ObjectId]) -> anyhow::Result<ObjectId> {
        if self.0.is_empty() || !self.0.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GitletError::CommitNotFound.into());
        }

        let mut candidates = history.iter().filter(|oid| oid.starts_with(&self.0));

        match (candidates.next(), candidates.next()) {
            (None, _) => Err(GitletError::CommitNotFound.into()),
            (Some(oid), None) => Ok(oid.clone()),
            (Some(_), Some(_)) => Err(GitletError::AmbiguousCommitId(self.0.clone()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn oid(hex: &str) -> ObjectId {
        ObjectId::try_parse(format!("{hex:0<40}")).expect("valid test oid")
    }

    #[fixture]
    fn history() -> Vec<ObjectId> {
        vec![oid("abc1"), oid("abc2"), oid("def")]
    }

    #[rstest]
    fn resolves_unique_prefix(history: Vec<ObjectId>) -> anyhow::Result<()> {
        assert_eq!(Revision::new("abc2").resolve(&history)?, oid("abc2"));
        assert_eq!(Revision::new("DE").resolve(&history)?, oid("def"));
        Ok(())
    }

    #[rstest]
    fn full_id_resolves_to_itself(history: Vec<ObjectId>) -> anyhow::Result<()> {
        let full = oid("def");

        assert_eq!(Revision::new(full.as_ref()).resolve(&history)?, full);
        Ok(())
    }

    #[rstest]
    #[case("abc", GitletError::AmbiguousCommitId("abc".to_string()))]
    #[case("fff", GitletError::CommitNotFound)]
    #[case("", GitletError::CommitNotFound)]
    #[case("not-hex", GitletError::CommitNotFound)]
    fn rejects_unresolvable_prefixes(
        history: Vec<ObjectId>,
        #[case] prefix: &str,
        #[case] expected: GitletError,
    ) {
        let err = Revision::new(prefix)
            .resolve(&history)
            .expect_err("prefix must not resolve");

        assert_eq!(err.downcast_ref::<GitletError>(), Some(&expected));
    }
}
