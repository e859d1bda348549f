//! Blob object
//!
//! A blob is the raw content of one tracked file. Its serialization is the
//! identity function: the stored bytes are the file bytes, and the id is
//! the SHA-1 of those bytes.

use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;

#[derive(Debug, Clone, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId::hash(&self.content)
    }

    /// Content as text. Tracked files are treated as newline-delimited
    /// text throughout the diff and merge machinery.
    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identity_serialization_means_id_is_hash_of_content() {
        let blob = Blob::new(Bytes::from_static(b"hello\n"));
        assert_eq!(blob.object_id(), ObjectId::hash(b"hello\n"));
    }

    #[test]
    fn equal_content_shares_identity() {
        let a = Blob::new(Bytes::from_static(b"same"));
        let b = Blob::new(Bytes::from(b"same".to_vec()));
        assert_eq!(a.object_id(), b.object_id());
    }
}
