use crate::areas::repository::Repository;
use crate::errors::{JitError, Result};
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print history newest-first from HEAD, first parents only.
    pub fn log(&mut self) -> Result<()> {
        let head = self.refs().resolve_head()?;
        let commits = self.history_from(&head)?;

        for commit in commits {
            let header = format!("commit {}", commit.object_id());
            let date = commit
                .timestamp()
                .format("%a %b %-d %H:%M:%S %Y %z")
                .to_string();

            let mut writer = self.writer();
            writeln!(writer, "{}", header.yellow()).map_err(|e| JitError::io(self.path(), e))?;
            writeln!(writer, "Date:   {date}").map_err(|e| JitError::io(self.path(), e))?;
            writeln!(writer).map_err(|e| JitError::io(self.path(), e))?;
            for line in commit.message().lines() {
                writeln!(writer, "    {line}").map_err(|e| JitError::io(self.path(), e))?;
            }
            writeln!(writer).map_err(|e| JitError::io(self.path(), e))?;
        }

        Ok(())
    }
}
