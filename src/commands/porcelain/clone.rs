use crate::areas::repository::{JIT_DIR, Repository};
use crate::errors::{JitError, Result};
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Clone a local repository: copy its `.jit/` directory into the
    /// destination, then materialize the working tree from the HEAD
    /// commit.
    pub fn clone_repository(
        src: &Path,
        dst: &Path,
        writer: Box<dyn std::io::Write>,
    ) -> Result<Repository> {
        let src_jit = src.join(JIT_DIR);
        if !src_jit.exists() {
            return Err(JitError::InvalidPath(format!(
                "{} is not a jit repository",
                src.display()
            )));
        }

        let repository = Repository::new(dst.to_path_buf(), writer)?;
        copy_dir(&src_jit, &repository.jit_path())?;

        let head_oid = repository.refs().resolve_head()?;
        let tree_oid = repository
            .database()
            .load_commit(&head_oid)?
            .tree_oid()
            .clone();
        repository
            .workspace()
            .extract_tree(repository.database(), &tree_oid, repository.path())?;

        writeln!(
            repository.writer(),
            "Cloned repository to '{}'",
            dst.display()
        )
        .map_err(|e| JitError::io(dst, e))?;

        Ok(repository)
    }
}

/// Recursive directory copy.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst).map_err(|e| JitError::io(dst, e))?;

    let dir = std::fs::read_dir(src).map_err(|e| JitError::io(src, e))?;
    for dir_entry in dir {
        let dir_entry = dir_entry.map_err(|e| JitError::io(src, e))?;
        let src_path = dir_entry.path();
        let dst_path = dst.join(dir_entry.file_name());

        if src_path.is_dir() {
            copy_dir(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path).map_err(|e| JitError::io(&src_path, e))?;
        }
    }

    Ok(())
}
