//! Porcelain commands
//!
//! Each command is an `impl Repository` block operating on one loaded session.
//!
//! ## Commands
//!
//! - `init`: Create a repository with its initial commit
//! - `add` / `rm`: Stage files for addition or removal
//! - `commit`: Record the staged changes
//! - `log` / `global_log` / `find`: Browse commit history
//! - `status`: Show branches, staging and working directory changes
//! - `branch` / `rm_branch`: Manage branch pointers
//! - `checkout` / `reset`: Restore files, switch branches, move the active branch
//! - `merge`: Three-way merge of another branch into the active one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;
