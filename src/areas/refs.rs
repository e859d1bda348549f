//! Refs and HEAD
//!
//! A ref is a file under `refs/heads/<branch>` holding a commit hash.
//! HEAD is either symbolic (`ref: refs/heads/<branch>\n`, attached) or a
//! bare hash (detached). Only attached HEAD is written by this engine;
//! detached HEAD is recognized on read.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{JitError, Result};
use std::path::{Path, PathBuf};

/// Branch a fresh repository starts on.
pub const DEFAULT_BRANCH: &str = "master";

/// Parsed content of the HEAD file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD names a branch ref.
    Attached(String),
    /// HEAD holds a bare commit hash.
    Detached(ObjectId),
}

pub struct Refs {
    /// Path to the repository directory (`.jit`).
    path: Box<Path>,
}

impl Refs {
    pub fn new(path: Box<Path>) -> Self {
        Refs { path }
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join("HEAD")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    fn branch_path(&self, name: &str) -> PathBuf {
        self.heads_path().join(name)
    }

    /// Parse the HEAD file.
    pub fn read_head(&self) -> Result<Head> {
        let head_path = self.head_path();
        let content =
            std::fs::read_to_string(&head_path).map_err(|e| JitError::io(&head_path, e))?;
        let content = content.trim();

        match content.strip_prefix("ref:") {
            Some(ref_path) => {
                let branch = ref_path
                    .trim()
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                if branch.is_empty() {
                    return Err(JitError::malformed("HEAD", "empty ref path"));
                }

                Ok(Head::Attached(branch))
            }
            None => Ok(Head::Detached(ObjectId::try_parse(content)?)),
        }
    }

    /// Name of the checked-out branch, or `None` when detached.
    pub fn current_branch(&self) -> Result<Option<String>> {
        match self.read_head()? {
            Head::Attached(branch) => Ok(Some(branch)),
            Head::Detached(_) => Ok(None),
        }
    }

    /// Commit hash HEAD ultimately points at.
    ///
    /// Fails with `NoMasterYet` when the branch ref file does not exist
    /// yet, which is the state between `init` and the first commit.
    pub fn resolve_head(&self) -> Result<ObjectId> {
        match self.read_head()? {
            Head::Detached(oid) => Ok(oid),
            Head::Attached(branch) => self.read_branch_ref(&branch),
        }
    }

    /// Tip of a named branch.
    pub fn read_branch(&self, name: &str) -> Result<ObjectId> {
        if !self.branch_path(name).exists() {
            return Err(JitError::BranchMissing(name.to_string()));
        }

        self.read_branch_ref(name)
    }

    fn read_branch_ref(&self, name: &str) -> Result<ObjectId> {
        let ref_path = self.branch_path(name);

        let content = match std::fs::read_to_string(&ref_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(JitError::NoMasterYet(name.to_string()));
            }
            Err(e) => return Err(JitError::io(&ref_path, e)),
        };

        ObjectId::try_parse(content.trim())
    }

    /// Advance whatever HEAD points at: the branch ref when attached,
    /// HEAD itself when detached.
    pub fn update_current_ref(&self, oid: &ObjectId) -> Result<()> {
        match self.read_head()? {
            Head::Attached(branch) => self.write_ref_file(&self.branch_path(&branch), oid),
            Head::Detached(_) => {
                let head_path = self.head_path();
                std::fs::write(&head_path, format!("{oid}\n"))
                    .map_err(|e| JitError::io(&head_path, e))
            }
        }
    }

    /// Point HEAD at a branch.
    pub fn set_head_branch(&self, name: &str) -> Result<()> {
        let head_path = self.head_path();
        std::fs::write(&head_path, format!("ref: refs/heads/{name}\n"))
            .map_err(|e| JitError::io(&head_path, e))
    }

    /// Create a branch at the current HEAD commit.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        Self::validate_branch_name(name)?;

        if self.branch_path(name).exists() {
            return Err(JitError::BranchExists(name.to_string()));
        }

        let head_oid = self.resolve_head()?;
        self.write_ref_file(&self.branch_path(name), &head_oid)
    }

    /// All branch names under `refs/heads`, sorted.
    pub fn list_branches(&self) -> Result<Vec<String>> {
        let heads_path = self.heads_path();

        let mut branches = Vec::new();
        let dir = std::fs::read_dir(&heads_path).map_err(|e| JitError::io(&heads_path, e))?;
        for dir_entry in dir {
            let dir_entry = dir_entry.map_err(|e| JitError::io(&heads_path, e))?;
            if dir_entry.path().is_file() {
                branches.push(dir_entry.file_name().to_string_lossy().into_owned());
            }
        }

        branches.sort();
        Ok(branches)
    }

    /// Branch names are single path components.
    fn validate_branch_name(name: &str) -> Result<()> {
        let valid = !name.is_empty()
            && !name.contains(['/', '\\'])
            && !name.contains(char::is_whitespace)
            && !name.starts_with('.');

        if valid {
            Ok(())
        } else {
            Err(JitError::InvalidPath(name.to_string()))
        }
    }

    fn write_ref_file(&self, ref_path: &Path, oid: &ObjectId) -> Result<()> {
        std::fs::write(ref_path, format!("{oid}\n")).map_err(|e| JitError::io(ref_path, e))
    }
}
