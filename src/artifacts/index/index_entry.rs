//! A single staged file
//!
//! Index entries pair a blob hash with the file mode and the repository
//! root-relative, forward-slash path of the file. The path is the upsert
//! key: the index holds at most one entry per path.

use crate::artifacts::index::entry_mode::EntryMode;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Blob hash of the staged content.
    pub oid: ObjectId,
    /// File permission bits at staging time.
    pub mode: EntryMode,
    /// Root-relative POSIX path.
    pub path: String,
}

impl IndexEntry {
    /// Wire form: `<hash> <mode> <path>`.
    pub fn to_line(&self) -> String {
        format!("{} {} {}", self.oid, self.mode, self.path)
    }
}
