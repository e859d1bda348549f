use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::{JitError, Result};
use std::io::Write;

impl Repository {
    /// Switch to a branch.
    ///
    /// Refuses when the working tree is dirty. On a real switch the
    /// index is rewritten to the target tree, the working directory is
    /// reconciled, and HEAD is reattached last.
    pub fn checkout(&mut self, branch: &str) -> Result<()> {
        let target_oid = self.refs().read_branch(branch)?;
        let current_oid = self.refs().resolve_head()?;

        if self.has_changes()? {
            return Err(JitError::DirtyWorkingTree);
        }

        if target_oid == current_oid {
            self.refs().set_head_branch(branch)?;
            return self.report_switch(branch);
        }

        let current_tree = self.database().load_commit(&current_oid)?.tree_oid().clone();
        let target_tree = self.database().load_commit(&target_oid)?.tree_oid().clone();

        // index first: stage the exact snapshot being materialized
        let mut index = self.load_index()?;
        let files = self.database().flatten_tree(&target_tree)?;
        index.replace_all(
            files
                .into_iter()
                .map(|(path, (oid, mode))| IndexEntry::new(oid, mode, path)),
        );
        index.save()?;

        self.workspace()
            .rebuild(self.database(), &current_tree, &target_tree)?;

        self.refs().set_head_branch(branch)?;
        self.report_switch(branch)
    }

    fn report_switch(&self, branch: &str) -> Result<()> {
        writeln!(self.writer(), "Switched to branch '{branch}'")
            .map_err(|e| JitError::io(self.path(), e))
    }
}
