//! Repository facade
//!
//! Coordinates the areas (database, index, refs, workspace) and carries
//! the output writer. Porcelain operations are implemented as methods on
//! `Repository` in `commands::porcelain`.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::ignore::IgnorePatterns;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{JitError, Result};
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Repository directory name.
pub const JIT_DIR: &str = ".jit";

/// Object database directory name, under the repository directory.
pub const OBJECTS_DIR: &str = "objects";

/// Index file name, under the repository directory.
pub const INDEX_FILE: &str = "index";

pub struct Repository {
    /// Repository root (the working directory).
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests).
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> Result<Self> {
        if !path.exists() {
            std::fs::create_dir_all(&path).map_err(|e| JitError::io(&path, e))?;
        }
        let path = path.canonicalize().map_err(|e| JitError::io(&path, e))?;

        let database = Database::new(path.join(JIT_DIR).join(OBJECTS_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(JIT_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn jit_path(&self) -> PathBuf {
        self.path.join(JIT_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.jit_path().join(INDEX_FILE)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn load_index(&self) -> Result<Index> {
        Index::load(self.index_path().into_boxed_path())
    }

    pub fn ignore_patterns(&self) -> Result<IgnorePatterns> {
        IgnorePatterns::load(&self.path)
    }

    /// Dirty-state detection over three tree hashes: HEAD's tree, the
    /// tree the index would commit, and the tree of the working
    /// directory. Uncommitted means index differs from HEAD; unstaged
    /// means index differs from the working tree. Nothing is written to
    /// the object store here.
    pub fn has_changes(&self) -> Result<bool> {
        let head_oid = self.refs.resolve_head()?;
        let head_tree = self.database.load_commit(&head_oid)?.tree_oid().clone();

        let index = self.load_index()?;
        let index_tree = Tree::build(index.entries());

        let work_entries = self.workspace.scan_entries(&self.ignore_patterns()?)?;
        let work_tree = Tree::build(work_entries.iter());

        let uncommitted = *index_tree.object_id() != head_tree;
        let unstaged = index_tree.object_id() != work_tree.object_id();

        Ok(uncommitted || unstaged)
    }
}
