//! Object model
//!
//! The three immutable, content-addressed object kinds:
//!
//! - `blob`: raw file content
//! - `tree`: a directory snapshot referring to blobs and subtrees by hash
//! - `commit`: a tree snapshot plus parent links, timestamp and message
//!
//! plus `object_id`, the 40-hex SHA-1 identifier shared by all of them.

pub mod blob;
pub mod commit;
pub mod object_id;
pub mod tree;
