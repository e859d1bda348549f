use crate::areas::repository::Repository;
use crate::artifacts::diff::diff_commits;
use crate::artifacts::diff::unified::render_unified;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{JitError, Result};
use std::io::Write;

impl Repository {
    /// Print the per-file unified diff between two commits.
    pub fn diff(&mut self, from: &str, to: &str) -> Result<()> {
        let from = ObjectId::try_parse(from)?;
        let to = ObjectId::try_parse(to)?;

        let diffs = diff_commits(self.database(), &from, &to)?;

        let mut writer = self.writer();
        for (path, file_diff) in diffs {
            let rendered = render_unified(&path, &file_diff.old, &file_diff.new);
            if rendered.is_empty() {
                continue;
            }

            writeln!(writer, "Difference in '{path}':")
                .map_err(|e| JitError::io(self.path(), e))?;
            write!(writer, "{rendered}").map_err(|e| JitError::io(self.path(), e))?;
        }

        Ok(())
    }
}
