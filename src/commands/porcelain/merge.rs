use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_commits;
use crate::artifacts::diff::segment::render;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::merge::{ancestor::find_merge_base, reconcile};
use crate::errors::{JitError, Result};
use chrono::Utc;
use std::collections::BTreeMap;
use std::io::Write;

/// Result of a merge, as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Neither side changed anything since the base; no commit was made.
    AlreadyUpToDate,
    /// A merge commit was created; conflicted paths (possibly none) are
    /// listed, their on-disk content carrying conflict markers.
    Merged { conflicts: Vec<String> },
}

impl Repository {
    /// Three-way merge of `target_branch` into HEAD.
    ///
    /// Diffs both tips against their merge base, reconciles per file,
    /// writes the merged contents into the working directory, stages
    /// them, and records a two-parent merge commit (ours first). A
    /// conflicted file is left on disk with markers; the commit is still
    /// created.
    pub fn merge(&mut self, target_branch: &str) -> Result<MergeOutcome> {
        let theirs = self.refs().read_branch(target_branch)?;
        let ours = self.refs().resolve_head()?;

        let base = find_merge_base(self.database(), &ours, &theirs)?;

        let base_to_ours = diff_commits(self.database(), &base, &ours)?;
        let base_to_theirs = diff_commits(self.database(), &base, &theirs)?;

        if base_to_ours.is_empty() && base_to_theirs.is_empty() {
            writeln!(self.writer(), "No changes in either branch since merge base.")
                .map_err(|e| JitError::io(self.path(), e))?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }

        let mut merged_files = BTreeMap::new();
        let mut conflicts = Vec::new();

        let mut paths: Vec<&String> = base_to_ours.keys().chain(base_to_theirs.keys()).collect();
        paths.sort();
        paths.dedup();

        for path in paths {
            let merged_content = match (base_to_ours.get(path), base_to_theirs.get(path)) {
                (Some(our_diff), None) => render(&our_diff.segments),
                (None, Some(their_diff)) => render(&their_diff.segments),
                (Some(our_diff), Some(their_diff)) => {
                    let (merged, conflicted) =
                        reconcile(&our_diff.segments, &their_diff.segments);
                    if conflicted {
                        conflicts.push(path.clone());
                    }
                    render(&merged)
                }
                (None, None) => continue,
            };

            merged_files.insert(path.clone(), merged_content);
        }

        // materialize and stage the merged state
        let mut index = self.load_index()?;
        for (path, content) in &merged_files {
            let file_path = self.path().join(path);
            let mode = if file_path.exists() {
                self.workspace().file_mode(&file_path)?
            } else {
                Default::default()
            };
            self.workspace()
                .write_file(&file_path, content.as_bytes(), mode)?;

            let blob_oid = self.database().put(content.as_bytes())?;
            index.upsert(IndexEntry::new(blob_oid, mode, path.clone()));
        }
        index.save()?;

        let message = format!("Merged branch {target_branch} into HEAD");
        self.write_commit(&message, Utc::now(), Some(theirs))?;

        for path in &conflicts {
            eprintln!("Conflict detected in file: {path}");
        }
        writeln!(self.writer(), "{message}").map_err(|e| JitError::io(self.path(), e))?;

        Ok(MergeOutcome::Merged { conflicts })
    }
}
