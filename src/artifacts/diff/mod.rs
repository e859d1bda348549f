//! Diff engine
//!
//! Line-oriented diffing between blob contents, and its aggregation to
//! per-path diff maps between two commits:
//!
//! - `myers`: shortest-edit-script line diff
//! - `segment`: run-coalesced `(kind, text)` segments, the form merge
//!   consumes
//! - `unified`: hunked unified rendering for human output

pub mod myers;
pub mod segment;
pub mod unified;

use crate::areas::database::Database;
use crate::artifacts::diff::segment::{Segment, segments_between};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::BTreeMap;

/// Diff of one file between two commits. Contents are empty on the
/// missing side of an addition or deletion.
#[derive(Debug, Clone)]
pub struct FileDiff {
    pub old: String,
    pub new: String,
    pub segments: Vec<Segment>,
}

/// Per-path diffs between two commits. Unchanged paths are omitted.
pub type CommitDiff = BTreeMap<String, FileDiff>;

/// Compare the trees of two commits file by file.
///
/// Both trees are flattened to `path -> blob hash` maps; the union of
/// paths is classified as deleted (old vs empty), added (empty vs new)
/// or modified (line diff of both contents).
pub fn diff_commits(database: &Database, a: &ObjectId, b: &ObjectId) -> Result<CommitDiff> {
    let commit_a = database.load_commit(a)?;
    let commit_b = database.load_commit(b)?;

    let files_a = database.flatten_tree(commit_a.tree_oid())?;
    let files_b = database.flatten_tree(commit_b.tree_oid())?;

    let mut paths: Vec<&String> = files_a.keys().chain(files_b.keys()).collect();
    paths.sort();
    paths.dedup();

    let mut diffs = CommitDiff::new();
    for path in paths {
        let old_oid = files_a.get(path).map(|(oid, _)| oid);
        let new_oid = files_b.get(path).map(|(oid, _)| oid);

        let (old, new) = match (old_oid, new_oid) {
            (Some(old_oid), None) => (database.load_blob_text(old_oid)?, String::new()),
            (None, Some(new_oid)) => (String::new(), database.load_blob_text(new_oid)?),
            (Some(old_oid), Some(new_oid)) if old_oid != new_oid => (
                database.load_blob_text(old_oid)?,
                database.load_blob_text(new_oid)?,
            ),
            _ => continue,
        };

        let segments = segments_between(&old, &new);
        diffs.insert(path.clone(), FileDiff { old, new, segments });
    }

    Ok(diffs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::index::entry_mode::EntryMode;
    use crate::artifacts::index::index_entry::IndexEntry;
    use crate::artifacts::objects::commit::{Commit, Parents};
    use crate::artifacts::objects::tree::Tree;
    use assert_fs::TempDir;
    use chrono::DateTime;
    use pretty_assertions::assert_eq;

    fn commit_of(db: &Database, files: &[(&str, &str)], seconds: i64) -> ObjectId {
        let entries: Vec<IndexEntry> = files
            .iter()
            .map(|(path, content)| {
                let oid = db.put(content.as_bytes()).unwrap();
                IndexEntry::new(oid, EntryMode::REGULAR, path.to_string())
            })
            .collect();

        let tree = Tree::build(entries.iter());
        db.put_tree(&tree).unwrap();

        let commit = Commit::new(
            tree.object_id().clone(),
            Parents::None,
            DateTime::from_timestamp(seconds, 0).unwrap(),
            "snapshot".to_string(),
        );
        db.put_commit(&commit).unwrap()
    }

    #[test]
    fn classifies_added_deleted_and_modified_paths() {
        let dir = TempDir::new().unwrap();
        let objects = dir.path().join("objects");
        std::fs::create_dir_all(&objects).unwrap();
        let db = Database::new(objects.into_boxed_path());

        let a = commit_of(&db, &[("keep.txt", "same\n"), ("gone.txt", "bye\n"), ("mod.txt", "v1\n")], 1);
        let b = commit_of(&db, &[("keep.txt", "same\n"), ("new.txt", "hi\n"), ("mod.txt", "v2\n")], 2);

        let diffs = diff_commits(&db, &a, &b).unwrap();

        let paths: Vec<_> = diffs.keys().cloned().collect();
        assert_eq!(paths, vec!["gone.txt", "mod.txt", "new.txt"]);

        assert_eq!(diffs["gone.txt"].old, "bye\n");
        assert_eq!(diffs["gone.txt"].new, "");
        assert_eq!(diffs["new.txt"].old, "");
        assert_eq!(diffs["new.txt"].new, "hi\n");
        assert_eq!(diffs["mod.txt"].old, "v1\n");
        assert_eq!(diffs["mod.txt"].new, "v2\n");
    }

    #[test]
    fn identical_commits_produce_an_empty_diff() {
        let dir = TempDir::new().unwrap();
        let objects = dir.path().join("objects");
        std::fs::create_dir_all(&objects).unwrap();
        let db = Database::new(objects.into_boxed_path());

        let a = commit_of(&db, &[("a.txt", "x\n")], 1);
        let b = commit_of(&db, &[("a.txt", "x\n")], 2);

        assert!(diff_commits(&db, &a, &b).unwrap().is_empty());
    }

    #[test]
    fn nested_paths_use_posix_joins() {
        let dir = TempDir::new().unwrap();
        let objects = dir.path().join("objects");
        std::fs::create_dir_all(&objects).unwrap();
        let db = Database::new(objects.into_boxed_path());

        let a = commit_of(&db, &[("src/lib.rs", "old\n")], 1);
        let b = commit_of(&db, &[("src/lib.rs", "new\n")], 2);

        let diffs = diff_commits(&db, &a, &b).unwrap();
        assert!(diffs.contains_key("src/lib.rs"));
    }
}
