use crate::artifacts::objects::object_id::ObjectId;
use thiserror::Error;

/// Every outcome a command can end with other than success.
///
/// User errors carry the exact one-line message printed to the user.
/// `ObjectNotFound` and `CorruptSnapshot` signal a damaged repository instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GitletError {
    #[error("Please enter a command.")]
    MissingCommand,

    #[error("No command with that name exists.")]
    UnknownCommand,

    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("Not in an initialized Gitlet directory.")]
    NotInitialized,

    #[error("A Gitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("File is outside the repository.")]
    OutsideRepository,

    #[error("No changes added to the commit.")]
    NothingToCommit,

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("No reason to remove the file.")]
    NoReasonToRemove,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("A branch with that name does not exist.")]
    NoSuchBranch,

    #[error("Cannot remove the current branch.")]
    CannotDeleteCurrent,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("Invalid branch name: {0}.")]
    InvalidBranchName(String),

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("Ambiguous commit id {0}.")]
    AmbiguousCommitId(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileConflict,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("object {0} is missing from the object store")]
    ObjectNotFound(ObjectId),

    #[error("session snapshot is corrupt: {0}")]
    CorruptSnapshot(String),
}

impl GitletError {
    /// Whether the error is an expected outcome of bad input rather than a damaged repository
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            GitletError::ObjectNotFound(_) | GitletError::CorruptSnapshot(_)
        )
    }
}
