use crate::areas::refs::DEFAULT_BRANCH;
use crate::areas::repository::{JIT_DIR, Repository};
use crate::errors::{JitError, Result};
use std::io::Write;

impl Repository {
    /// Create the repository layout: `.jit/` with `objects/`,
    /// `refs/heads/` and a HEAD attached to the default branch. No
    /// initial commit is made.
    pub fn init(&mut self) -> Result<()> {
        let jit_path = self.jit_path();

        if jit_path.exists() {
            return Err(JitError::io(
                &jit_path,
                std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "a repository already exists here",
                ),
            ));
        }

        std::fs::create_dir(&jit_path).map_err(|e| JitError::io(&jit_path, e))?;

        let objects_path = self.database().objects_path().to_path_buf();
        std::fs::create_dir_all(&objects_path).map_err(|e| JitError::io(&objects_path, e))?;

        let heads_path = self.refs().heads_path();
        std::fs::create_dir_all(&heads_path).map_err(|e| JitError::io(&heads_path, e))?;

        self.refs().set_head_branch(DEFAULT_BRANCH)?;

        writeln!(
            self.writer(),
            "Initialized empty jit repository in {}",
            self.path().join(JIT_DIR).display()
        )
        .map_err(|e| JitError::io(self.path(), e))?;

        Ok(())
    }
}
