//! Staging area
//!
//! The index is the sole input to the next commit's tree. It is an
//! ordered set of `(hash, mode, path)` entries keyed by the root-relative
//! POSIX path, persisted as text lines `<hash> <mode> <path>\n`.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{JitError, Result};
use std::collections::BTreeMap;
use std::path::Path;

pub struct Index {
    /// Path to the index file.
    path: Box<Path>,
    /// Staged entries keyed by path. At most one entry per path.
    entries: BTreeMap<String, IndexEntry>,
}

impl Index {
    /// Load the index from disk. An absent file yields an empty index.
    pub fn load(path: Box<Path>) -> Result<Index> {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(JitError::io(&path, e)),
        };

        let mut entries = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.splitn(3, ' ');
            let (hash, mode, file_path) = match (parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(m), Some(p)) => (h, m, p),
                _ => {
                    return Err(JitError::malformed(
                        "index",
                        format!("entry line '{line}' has too few fields"),
                    ));
                }
            };

            let entry = IndexEntry::new(
                ObjectId::try_parse(hash)?,
                EntryMode::parse_octal(mode)?,
                file_path.to_string(),
            );
            entries.insert(entry.path.clone(), entry);
        }

        Ok(Index { path, entries })
    }

    /// Overwrite the index file with the current entries.
    ///
    /// The rewrite goes through a temp file and a rename so a crash never
    /// leaves a half-written index behind.
    pub fn save(&self) -> Result<()> {
        let mut out = String::new();
        for entry in self.entries.values() {
            out.push_str(&entry.to_line());
            out.push('\n');
        }

        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, out).map_err(|e| JitError::io(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| JitError::io(&self.path, e))
    }

    /// Stage an entry, replacing any previous entry for the same path.
    pub fn upsert(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.path.clone(), entry);
    }

    /// Throw away the current entries and stage a whole snapshot instead
    /// (checkout switching the index to a target tree).
    pub fn replace_all(&mut self, entries: impl IntoIterator<Item = IndexEntry>) {
        self.entries.clear();
        for entry in entries {
            self.upsert(entry);
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
