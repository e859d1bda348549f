//! Working directory
//!
//! Filesystem side of the engine: scanning the working tree into a
//! synthetic index (hashing without storing), materializing trees, and
//! reconciling the on-disk state between two commits.

use crate::areas::database::Database;
use crate::areas::repository::JIT_DIR;
use crate::artifacts::ignore::IgnorePatterns;
use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{EntryKind, Tree, TreeEntry};
use crate::errors::{JitError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct Workspace {
    /// Repository root.
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Canonicalize a path to the repository-root-relative, forward-slash
    /// form used as index key.
    pub fn relativize(&self, path: &Path) -> Result<String> {
        let absolute = path.canonicalize().map_err(|e| JitError::io(path, e))?;

        let relative = absolute
            .strip_prefix(self.path.as_ref())
            .map_err(|_| JitError::AddOutsideRepo(path.to_path_buf()))?;

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                std::path::Component::Normal(name) => {
                    parts.push(name.to_string_lossy().into_owned())
                }
                _ => return Err(JitError::InvalidPath(path.display().to_string())),
            }
        }

        if parts.is_empty() {
            return Err(JitError::InvalidPath(path.display().to_string()));
        }

        Ok(parts.join("/"))
    }

    /// All regular files under `start`, skipping the repository directory
    /// and ignored paths. Paths come back absolute.
    pub fn list_files(&self, start: &Path, ignore: &IgnorePatterns) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walk = WalkDir::new(start)
            .into_iter()
            .filter_entry(|e| e.file_name().to_string_lossy() != JIT_DIR);

        for entry in walk {
            let entry = entry.map_err(|e| {
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("walk failed"));
                JitError::io(start, io)
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let rel = self.relativize(entry.path())?;
            if ignore.is_ignored(&rel) {
                continue;
            }

            files.push(entry.path().to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Build a synthetic index over the working directory: every tracked
    /// candidate file hashed in place, nothing written to the store.
    pub fn scan_entries(&self, ignore: &IgnorePatterns) -> Result<Vec<IndexEntry>> {
        let mut entries = Vec::new();

        for file_path in self.list_files(&self.path, ignore)? {
            let data = std::fs::read(&file_path).map_err(|e| JitError::io(&file_path, e))?;
            let rel = self.relativize(&file_path)?;

            entries.push(IndexEntry::new(
                ObjectId::hash(&data),
                self.file_mode(&file_path)?,
                rel,
            ));
        }

        Ok(entries)
    }

    /// Permission bits of a file as an entry mode.
    pub fn file_mode(&self, path: &Path) -> Result<EntryMode> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            let metadata = std::fs::metadata(path).map_err(|e| JitError::io(path, e))?;
            Ok(EntryMode::from_file_mode(metadata.mode()))
        }
        #[cfg(not(unix))]
        {
            let _ = path;
            Ok(EntryMode::REGULAR)
        }
    }

    /// Materialize a tree into a directory: subtrees become directories
    /// (mode 0755), blobs become files with the entry's permission bits.
    pub fn extract_tree(&self, database: &Database, tree_oid: &ObjectId, dst: &Path) -> Result<()> {
        let tree = database.load_tree(tree_oid)?;

        for entry in tree.entries() {
            let entry_path = dst.join(&entry.name);

            match entry.kind {
                EntryKind::Tree => {
                    std::fs::create_dir_all(&entry_path)
                        .map_err(|e| JitError::io(&entry_path, e))?;
                    self.extract_tree(database, &entry.oid, &entry_path)?;
                }
                EntryKind::Blob => {
                    let data = database.get(&entry.oid)?;
                    self.write_file(&entry_path, &data, entry.mode)?;
                }
            }
        }

        Ok(())
    }

    /// Reconcile the working directory from the current commit's tree to
    /// the target commit's tree by applying a per-name diff: delete what
    /// only the current tree has, create what only the target has,
    /// overwrite changed blobs and recurse into changed subtrees (so
    /// untracked files in shared subdirectories survive).
    pub fn rebuild(
        &self,
        database: &Database,
        curr_tree: &ObjectId,
        target_tree: &ObjectId,
    ) -> Result<()> {
        self.rebuild_dir(database, curr_tree, target_tree, self.path.to_path_buf())
    }

    fn rebuild_dir(
        &self,
        database: &Database,
        curr_tree: &ObjectId,
        target_tree: &ObjectId,
        dir: PathBuf,
    ) -> Result<()> {
        let curr = Self::entry_map(&database.load_tree(curr_tree)?);
        let target = Self::entry_map(&database.load_tree(target_tree)?);

        for (name, entry) in &curr {
            if !target.contains_key(name) {
                self.remove_entry(&dir.join(name), entry)?;
            }
        }

        for (name, entry) in &target {
            let entry_path = dir.join(name);

            match curr.get(name) {
                None => self.create_entry(database, &entry_path, entry)?,
                Some(existing) if existing.oid == entry.oid => {}
                Some(existing) => match (existing.kind, entry.kind) {
                    (EntryKind::Blob, EntryKind::Blob) => {
                        let data = database.get(&entry.oid)?;
                        self.write_file(&entry_path, &data, entry.mode)?;
                    }
                    (EntryKind::Tree, EntryKind::Tree) => {
                        self.rebuild_dir(database, &existing.oid, &entry.oid, entry_path)?;
                    }
                    _ => {
                        // file replaced by directory or vice versa
                        self.remove_entry(&entry_path, existing)?;
                        self.create_entry(database, &entry_path, entry)?;
                    }
                },
            }
        }

        Ok(())
    }

    fn entry_map(tree: &Tree) -> BTreeMap<String, TreeEntry> {
        tree.entries()
            .iter()
            .map(|e| (e.name.clone(), e.clone()))
            .collect()
    }

    fn create_entry(&self, database: &Database, path: &Path, entry: &TreeEntry) -> Result<()> {
        match entry.kind {
            EntryKind::Tree => {
                std::fs::create_dir_all(path).map_err(|e| JitError::io(path, e))?;
                self.extract_tree(database, &entry.oid, path)
            }
            EntryKind::Blob => {
                let data = database.get(&entry.oid)?;
                self.write_file(path, &data, entry.mode)
            }
        }
    }

    fn remove_entry(&self, path: &Path, entry: &TreeEntry) -> Result<()> {
        let result = match entry.kind {
            EntryKind::Tree => std::fs::remove_dir_all(path),
            EntryKind::Blob => std::fs::remove_file(path),
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(JitError::io(path, e)),
        }
    }

    /// Write a file and apply the entry's permission bits.
    pub fn write_file(&self, path: &Path, data: &[u8], mode: EntryMode) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| JitError::io(parent, e))?;
        }

        std::fs::write(path, data).map_err(|e| JitError::io(path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode.permissions()))
                .map_err(|e| JitError::io(path, e))?;
        }
        #[cfg(not(unix))]
        let _ = mode;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn workspace_in(dir: &TempDir) -> Workspace {
        std::fs::create_dir_all(dir.path().join(JIT_DIR)).unwrap();
        Workspace::new(dir.path().canonicalize().unwrap().into_boxed_path())
    }

    #[test]
    fn scan_skips_the_repository_directory() {
        let dir = TempDir::new().unwrap();
        let workspace = workspace_in(&dir);

        std::fs::write(dir.path().join("tracked.txt"), "data").unwrap();
        std::fs::write(dir.path().join(JIT_DIR).join("index"), "internal").unwrap();

        let entries = workspace.scan_entries(&IgnorePatterns::default()).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["tracked.txt"]);
    }

    #[test]
    fn scan_honors_ignore_patterns() {
        let dir = TempDir::new().unwrap();
        let workspace = workspace_in(&dir);

        std::fs::write(dir.path().join("keep.txt"), "keep").unwrap();
        std::fs::write(dir.path().join("skip.log"), "skip").unwrap();

        let ignore = IgnorePatterns::from_patterns(vec!["*.log".to_string()]);
        let entries = workspace.scan_entries(&ignore).unwrap();
        let paths: Vec<_> = entries.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["keep.txt"]);
    }

    #[test]
    fn scan_hashes_without_writing_to_the_store() {
        let dir = TempDir::new().unwrap();
        let workspace = workspace_in(&dir);

        std::fs::write(dir.path().join("a.txt"), "content").unwrap();

        let entries = workspace.scan_entries(&IgnorePatterns::default()).unwrap();
        assert_eq!(entries[0].oid, ObjectId::hash(b"content"));
    }

    #[test]
    fn relativize_rejects_paths_outside_the_root() {
        let dir = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let workspace = workspace_in(&dir);

        std::fs::write(outside.path().join("alien.txt"), "x").unwrap();

        assert!(matches!(
            workspace.relativize(&outside.path().join("alien.txt")),
            Err(JitError::AddOutsideRepo(_))
        ));
    }

    #[test]
    fn relativize_uses_forward_slashes() {
        let dir = TempDir::new().unwrap();
        let workspace = workspace_in(&dir);

        std::fs::create_dir_all(dir.path().join("a").join("b")).unwrap();
        std::fs::write(dir.path().join("a").join("b").join("c.txt"), "x").unwrap();

        let rel = workspace
            .relativize(&dir.path().join("a").join("b").join("c.txt"))
            .unwrap();
        assert_eq!(rel, "a/b/c.txt");
    }
}
