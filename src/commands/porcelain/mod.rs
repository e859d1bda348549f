//! Porcelain commands
//!
//! - `init`: create the repository layout
//! - `add`: stage files and directories
//! - `commit`: snapshot the index into history
//! - `log`: walk history newest-first
//! - `branch`: list or create branches
//! - `checkout`: safe branch switching
//! - `merge`: three-way merge of a branch into HEAD
//! - `diff`: per-file unified diff between two commits
//! - `clone`: local copy of a repository plus checkout

pub mod add;
pub mod branch;
pub mod checkout;
pub mod clone;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
