use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use crate::errors::{JitError, Result};
use std::path::{Path, PathBuf};

impl Repository {
    /// Stage files: hash each candidate into the object store as a blob
    /// and upsert its index entry. Directories are walked recursively,
    /// skipping the repository directory and ignored paths.
    pub fn add(&mut self, paths: &[String]) -> Result<()> {
        let mut index = self.load_index()?;
        let ignore = self.ignore_patterns()?;

        for raw_path in paths {
            let start = self.resolve_input_path(raw_path);
            let start = start.canonicalize().map_err(|e| JitError::io(&start, e))?;

            let files = if start.is_dir() {
                self.workspace().list_files(&start, &ignore)?
            } else {
                vec![start]
            };

            for file_path in files {
                let rel = self.workspace().relativize(&file_path)?;
                if ignore.is_ignored(&rel) {
                    continue;
                }

                let data =
                    std::fs::read(&file_path).map_err(|e| JitError::io(&file_path, e))?;
                let blob = Blob::new(data.into());
                let blob_oid = self.database().put_blob(&blob)?;
                let mode = self.workspace().file_mode(&file_path)?;

                index.upsert(IndexEntry::new(blob_oid, mode, rel));
            }
        }

        index.save()
    }

    /// Interpret a CLI path argument relative to the repository root.
    fn resolve_input_path(&self, raw: &str) -> PathBuf {
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path().join(path)
        }
    }
}
