use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Commit, Parents};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{JitError, Result};
use chrono::{DateTime, Utc};
use std::io::Write;

impl Repository {
    /// Create a commit from the staged index at the current time.
    pub fn commit(&mut self, message: &str) -> Result<ObjectId> {
        let oid = self.write_commit(message, Utc::now(), None)?;

        let commit = self.database().load_commit(&oid)?;
        let label = match self.refs().current_branch()? {
            Some(branch) => branch,
            None => "detached HEAD".to_string(),
        };
        writeln!(
            self.writer(),
            "[{label} {}] {}",
            oid.to_short(),
            commit.short_message()
        )
        .map_err(|e| JitError::io(self.path(), e))?;

        Ok(oid)
    }

    /// Snapshot the index into a commit and advance the current ref.
    ///
    /// Object bytes land in the store before the ref moves, so a crash
    /// leaves at worst unreferenced objects, never a dangling ref.
    pub(crate) fn write_commit(
        &mut self,
        message: &str,
        timestamp: DateTime<Utc>,
        merged_parent: Option<ObjectId>,
    ) -> Result<ObjectId> {
        let index = self.load_index()?;
        if index.is_empty() {
            return Err(JitError::NothingStaged);
        }

        let tree = Tree::build(index.entries());
        self.database().put_tree(&tree)?;

        // absent branch ref just means this is the first commit
        let head = match self.refs().resolve_head() {
            Ok(oid) => Some(oid),
            Err(JitError::NoMasterYet(_)) => None,
            Err(e) => return Err(e),
        };

        let parents = Parents::assemble(head, merged_parent)?;
        let commit = Commit::new(
            tree.object_id().clone(),
            parents,
            timestamp,
            message.to_string(),
        );

        let oid = self.database().put_commit(&commit)?;
        self.refs().update_current_ref(&oid)?;

        Ok(oid)
    }

    /// History from a commit, newest first, following first parents only.
    pub fn history_from(&self, from: &ObjectId) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        let mut cursor = Some(from.clone());

        while let Some(oid) = cursor {
            let commit = self.database().load_commit(&oid)?;
            cursor = commit.parents().first().cloned();
            commits.push(commit);
        }

        Ok(commits)
    }
}
