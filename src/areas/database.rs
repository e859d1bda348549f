//! Object database
//!
//! A write-once key-value store mapping hex SHA-1 digests to raw object
//! bytes, backed by flat files under `objects/<hash>`. Objects are never
//! mutated or deleted, so the store needs no lifetime management and the
//! in-memory caches keyed by hash never go stale.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{EntryKind, Tree};
use crate::errors::{JitError, Result};
use bytes::Bytes;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Flattened view of a tree: root-relative path to blob hash and mode.
pub type FileMap = BTreeMap<String, (ObjectId, EntryMode)>;

pub struct Database {
    /// Path to the objects directory.
    path: Box<Path>,
    /// Most recently parsed commits, keyed by hash.
    commit_cache: RefCell<HashMap<ObjectId, Commit>>,
    /// Most recently parsed trees, keyed by hash.
    tree_cache: RefCell<HashMap<ObjectId, Tree>>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database {
            path,
            commit_cache: RefCell::new(HashMap::new()),
            tree_cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store a byte buffer, returning its hash.
    ///
    /// Idempotent: an object that already exists is left untouched. The
    /// write goes to a temp file first and is renamed into place, so
    /// readers never observe a torn object.
    pub fn put(&self, data: &[u8]) -> Result<ObjectId> {
        let oid = ObjectId::hash(data);
        let object_path = self.path.join(oid.as_ref());

        if !object_path.exists() {
            self.write_object(&object_path, data)?;
        }

        Ok(oid)
    }

    /// Load the raw bytes of an object.
    pub fn get(&self, oid: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(oid.as_ref());

        match std::fs::read(&object_path) {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(JitError::ObjectNotFound(oid.to_string()))
            }
            Err(e) => Err(JitError::io(&object_path, e)),
        }
    }

    pub fn exists(&self, oid: &ObjectId) -> bool {
        self.path.join(oid.as_ref()).exists()
    }

    /// Persist a tree hierarchy, children before parents.
    pub fn put_tree(&self, tree: &Tree) -> Result<()> {
        tree.traverse(&mut |subtree| {
            self.put(&subtree.serialize())?;
            Ok(())
        })
    }

    pub fn put_commit(&self, commit: &Commit) -> Result<ObjectId> {
        self.put(&commit.serialize())
    }

    pub fn put_blob(&self, blob: &Blob) -> Result<ObjectId> {
        self.put(blob.content())
    }

    pub fn load_tree(&self, oid: &ObjectId) -> Result<Tree> {
        if let Some(tree) = self.tree_cache.borrow().get(oid) {
            return Ok(tree.clone());
        }

        let tree = Tree::parse(oid.clone(), &self.get(oid)?)?;
        self.tree_cache
            .borrow_mut()
            .insert(oid.clone(), tree.clone());

        Ok(tree)
    }

    pub fn load_commit(&self, oid: &ObjectId) -> Result<Commit> {
        if let Some(commit) = self.commit_cache.borrow().get(oid) {
            return Ok(commit.clone());
        }

        let commit = Commit::parse(oid.clone(), &self.get(oid)?)?;
        self.commit_cache
            .borrow_mut()
            .insert(oid.clone(), commit.clone());

        Ok(commit)
    }

    /// Blob content as text.
    pub fn load_blob_text(&self, oid: &ObjectId) -> Result<String> {
        Ok(Blob::new(self.get(oid)?).as_text())
    }

    /// Flatten a tree into a `path -> (blob hash, mode)` map, joining
    /// nested names with `/`.
    pub fn flatten_tree(&self, oid: &ObjectId) -> Result<FileMap> {
        let mut files = BTreeMap::new();
        self.walk_tree("", oid, &mut files)?;

        Ok(files)
    }

    fn walk_tree(&self, prefix: &str, oid: &ObjectId, files: &mut FileMap) -> Result<()> {
        let tree = self.load_tree(oid)?;

        for entry in tree.entries() {
            let path = if prefix.is_empty() {
                entry.name.clone()
            } else {
                format!("{prefix}/{}", entry.name)
            };

            match entry.kind {
                EntryKind::Tree => self.walk_tree(&path, &entry.oid, files)?,
                EntryKind::Blob => {
                    files.insert(path, (entry.oid.clone(), entry.mode));
                }
            }
        }

        Ok(())
    }

    fn write_object(&self, object_path: &Path, data: &[u8]) -> Result<()> {
        let temp_path = self.path.join(format!("tmp-obj-{}", rand::random::<u32>()));

        std::fs::write(&temp_path, data).map_err(|e| JitError::io(&temp_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o644))
                .map_err(|e| JitError::io(&temp_path, e))?;
        }

        std::fs::rename(&temp_path, object_path).map_err(|e| JitError::io(object_path, e))
    }
}
