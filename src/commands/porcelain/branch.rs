use crate::areas::repository::Repository;
use crate::errors::{JitError, Result};
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create a branch at the current HEAD commit.
    pub fn create_branch(&mut self, name: &str) -> Result<()> {
        self.refs().create_branch(name)?;

        writeln!(self.writer(), "Created the branch '{name}'")
            .map_err(|e| JitError::io(self.path(), e))?;

        Ok(())
    }

    /// List branches, marking the checked-out one.
    pub fn list_branches(&mut self) -> Result<()> {
        let branches = self.refs().list_branches()?;
        let current = self.refs().current_branch()?;

        let mut writer = self.writer();
        writeln!(writer, "Branches:").map_err(|e| JitError::io(self.path(), e))?;
        for branch in branches {
            if Some(&branch) == current.as_ref() {
                writeln!(writer, "* {}", branch.green())
                    .map_err(|e| JitError::io(self.path(), e))?;
            } else {
                writeln!(writer, "  {branch}").map_err(|e| JitError::io(self.path(), e))?;
            }
        }

        Ok(())
    }
}
