//! Error surface of the engine
//!
//! Every fallible operation resolves to exactly one of these variants.
//! Callers branch on the variant, never on the rendered message.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JitError>;

#[derive(Debug, Error)]
pub enum JitError {
    /// Filesystem failure, with the path that was being touched.
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Lookup in the object store failed.
    #[error("object {0} not found in object store")]
    ObjectNotFound(String),

    /// A serialized object failed structural parsing.
    #[error("malformed {kind} object: {reason}")]
    MalformedObject { kind: &'static str, reason: String },

    /// Commit attempted with an empty index.
    #[error("no files staged")]
    NothingStaged,

    /// HEAD points at a branch ref that does not exist yet (pre-first-commit).
    #[error("no valid object named '{0}'")]
    NoMasterYet(String),

    #[error("branch '{0}' does not exist")]
    BranchMissing(String),

    #[error("branch '{0}' already exists")]
    BranchExists(String),

    /// Checkout blocked by unstaged or uncommitted changes.
    #[error(
        "cannot switch branch: unstaged or uncommitted changes. \
         Please commit your changes before switching branches"
    )]
    DirtyWorkingTree,

    #[error("no common ancestor found")]
    NoCommonAncestor,

    /// Path canonicalization escaped the repository root.
    #[error("path '{0}' is outside the repository")]
    AddOutsideRepo(PathBuf),

    #[error("invalid path '{0}'")]
    InvalidPath(String),
}

impl JitError {
    /// Wrap an io::Error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        JitError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        JitError::MalformedObject {
            kind,
            reason: reason.into(),
        }
    }
}
