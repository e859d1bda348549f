//! Object identifier (SHA-1 hash)
//!
//! Object ids are 40-character lowercase hexadecimal strings. They identify
//! every object in the store (blobs, trees, commits) and are the only way
//! objects refer to one another.

use crate::errors::{JitError, Result};
use sha1::{Digest, Sha1};

/// Length of a full object id in hex characters.
pub const OBJECT_ID_LENGTH: usize = 40;

/// Validated 40-hex object identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from a string.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(JitError::malformed(
                "object id",
                format!("invalid length {}", id.len()),
            ));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        {
            return Err(JitError::malformed(
                "object id",
                format!("invalid characters in '{id}'"),
            ));
        }

        Ok(ObjectId(id))
    }

    /// Compute the id of a byte buffer.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);

        ObjectId(format!("{:x}", hasher.finalize()))
    }

    /// Abbreviated form (first 7 characters) for display.
    pub fn to_short(&self) -> &str {
        &self.0[..7]
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
