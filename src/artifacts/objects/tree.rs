//! Tree object
//!
//! Trees snapshot one directory: a name-sorted list of entries, each a
//! blob (file) or a subtree (directory) referenced by hash.
//!
//! ## Serialization
//!
//! Stored form, one line per entry:
//! ```text
//! <mode> <kind> <name> <child_hash>\n
//! ```
//!
//! The hash input is the normalized form without the child hash column
//! (`<mode> <kind> <name>\n`), sorted by name before hashing so the id is
//! independent of insertion order. Every writer in this crate builds trees
//! through [`Tree::build`], keeping readers and writers in agreement.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{JitError, Result};
use bytes::Bytes;
use std::collections::BTreeMap;

/// Closed set of things a tree entry can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Blob,
    Tree,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Blob => "blob",
            EntryKind::Tree => "tree",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "blob" => Ok(EntryKind::Blob),
            "tree" => Ok(EntryKind::Tree),
            other => Err(JitError::malformed(
                "tree",
                format!("unknown entry kind '{other}'"),
            )),
        }
    }
}

/// One line of a tree: `(mode, kind, name, child hash)`.
///
/// `name` is a single path component; subdirectories are nested trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: EntryMode,
    pub kind: EntryKind,
    pub name: String,
    pub oid: ObjectId,
}

/// A directory snapshot.
///
/// Trees built from the index also hold their subtrees in memory so the
/// whole hierarchy can be persisted in one post-order pass; trees loaded
/// back from the store carry entries only.
#[derive(Debug, Clone)]
pub struct Tree {
    oid: ObjectId,
    entries: Vec<TreeEntry>,
    subtrees: Vec<Tree>,
}

impl Tree {
    /// Build a tree hierarchy from staged entries.
    ///
    /// Entries are partitioned on their first path component: bare names
    /// become blob leaves, the rest are grouped per directory and built
    /// recursively with the remainder paths. Pure: nothing is written to
    /// the object store, which also makes this usable for dirty detection
    /// over a synthetic index.
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Tree {
        let mut leaves: Vec<TreeEntry> = Vec::new();
        let mut groups: BTreeMap<String, Vec<IndexEntry>> = BTreeMap::new();

        for entry in entries {
            match entry.path.split_once('/') {
                None => leaves.push(TreeEntry {
                    mode: entry.mode,
                    kind: EntryKind::Blob,
                    name: entry.path.clone(),
                    oid: entry.oid.clone(),
                }),
                Some((dir, rest)) => {
                    groups.entry(dir.to_string()).or_default().push(IndexEntry::new(
                        entry.oid.clone(),
                        entry.mode,
                        rest.to_string(),
                    ));
                }
            }
        }

        let mut subtrees = Vec::new();
        for (dir, group) in groups {
            let subtree = Tree::build(group.iter());
            leaves.push(TreeEntry {
                mode: EntryMode::DIRECTORY,
                kind: EntryKind::Tree,
                name: dir,
                oid: subtree.object_id().clone(),
            });
            subtrees.push(subtree);
        }

        // sort before hashing so the id ignores insertion order
        leaves.sort_by(|a, b| a.name.cmp(&b.name));

        let oid = ObjectId::hash(Self::hash_input(&leaves).as_bytes());

        Tree {
            oid,
            entries: leaves,
            subtrees,
        }
    }

    /// Reload a tree from its stored form.
    pub fn parse(oid: ObjectId, data: &Bytes) -> Result<Tree> {
        let text = std::str::from_utf8(data)
            .map_err(|_| JitError::malformed("tree", "not valid utf-8"))?;

        let mut entries = Vec::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }

            let mut parts = line.splitn(4, ' ');
            let (mode, kind, name, child) = match (
                parts.next(),
                parts.next(),
                parts.next(),
                parts.next(),
            ) {
                (Some(m), Some(k), Some(n), Some(c)) => (m, k, n, c),
                _ => {
                    return Err(JitError::malformed(
                        "tree",
                        format!("entry line '{line}' has too few fields"),
                    ));
                }
            };

            entries.push(TreeEntry {
                mode: EntryMode::parse_octal(mode)?,
                kind: EntryKind::parse(kind)?,
                name: name.to_string(),
                oid: ObjectId::try_parse(child)?,
            });
        }

        Ok(Tree {
            oid,
            entries,
            subtrees: Vec::new(),
        })
    }

    pub fn object_id(&self) -> &ObjectId {
        &self.oid
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Visit the hierarchy post-order (children before parents), so a
    /// persisting visitor never stores a tree before its subtrees exist.
    pub fn traverse<F>(&self, visit: &mut F) -> Result<()>
    where
        F: FnMut(&Tree) -> Result<()>,
    {
        for subtree in &self.subtrees {
            subtree.traverse(visit)?;
        }
        visit(self)
    }

    /// Stored form, child hashes included.
    pub fn serialize(&self) -> Bytes {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!(
                "{} {} {} {}\n",
                entry.mode,
                entry.kind.as_str(),
                entry.name,
                entry.oid
            ));
        }

        Bytes::from(out)
    }

    /// Normalized hash input, child hashes excluded.
    fn hash_input(entries: &[TreeEntry]) -> String {
        let mut out = String::new();
        for entry in entries {
            out.push_str(&format!("{} {} {}\n", entry.mode, entry.kind.as_str(), entry.name));
        }

        out
    }
}
