use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::artifacts::core::GitletError;
use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            return Err(GitletError::InvalidBranchName(name).into());
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)
            .with_context(|| format!("invalid branch name regex: {INVALID_BRANCH_NAME_REGEX}"))?;

        if re.is_match(&name) {
            Err(GitletError::InvalidBranchName(name).into())
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    proptest! {
        #[test]
        fn plain_and_nested_names_are_accepted(
            segments in prop::collection::vec("[a-zA-Z0-9_-]{1,12}", 1..4)
        ) {
            let name = segments.join("/");

            let parsed = BranchName::try_parse(name.clone()).map(|branch| branch.to_string());

            prop_assert_eq!(parsed.ok(), Some(name));
        }

        #[test]
        fn names_with_forbidden_characters_are_rejected(
            prefix in "[a-z]{1,8}",
            forbidden in prop::sample::select(vec![' ', '~', '^', ':', '?', '*', '[', '\\']),
        ) {
            let name = format!("{prefix}{forbidden}x");

            prop_assert!(BranchName::try_parse(name).is_err());
        }
    }

    #[rstest]
    #[case::empty("")]
    #[case::leading_dot(".topic")]
    #[case::dot_segment("topic/.hidden")]
    #[case::double_dot("a..b")]
    #[case::leading_slash("/topic")]
    #[case::trailing_slash("topic/")]
    #[case::lock_suffix("topic.lock")]
    #[case::reflog_syntax("topic@{1}")]
    fn git_style_restrictions_apply(#[case] name: &str) {
        let err = BranchName::try_parse(name.to_string()).expect_err("name must be rejected");

        assert_eq!(
            err.downcast_ref::<GitletError>(),
            Some(&GitletError::InvalidBranchName(name.to_string()))
        );
    }
}
