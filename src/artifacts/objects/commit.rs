//! Commit object
//!
//! A commit records one tree, its parent commits, a timestamp and a
//! message.
//!
//! ## Serialization
//!
//! ```text
//! tree <tree_hash>
//! parent <parent_hash>        (zero, one or two lines)
//! timestamp <unix-seconds>
//!
//! <message>
//! ```
//!
//! The commit id is the SHA-1 of this serialization.

use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{JitError, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Parent links of a commit.
///
/// The shape is closed: a root commit has none, a normal commit has one,
/// a merge commit has exactly two (ours first, theirs second).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parents {
    None,
    One(ObjectId),
    Two { ours: ObjectId, theirs: ObjectId },
}

impl Parents {
    /// Assemble parents from the current HEAD (absent on the very first
    /// commit) and an optional merge parent.
    pub fn assemble(head: Option<ObjectId>, merged: Option<ObjectId>) -> Result<Parents> {
        match (head, merged) {
            (None, None) => Ok(Parents::None),
            (Some(head), None) => Ok(Parents::One(head)),
            (Some(ours), Some(theirs)) => Ok(Parents::Two { ours, theirs }),
            (None, Some(_)) => Err(JitError::malformed(
                "commit",
                "merge commit requires a current HEAD",
            )),
        }
    }

    /// First parent, the one `log` follows.
    pub fn first(&self) -> Option<&ObjectId> {
        match self {
            Parents::None => None,
            Parents::One(oid) => Some(oid),
            Parents::Two { ours, .. } => Some(ours),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObjectId> {
        let (a, b) = match self {
            Parents::None => (None, None),
            Parents::One(oid) => (Some(oid), None),
            Parents::Two { ours, theirs } => (Some(ours), Some(theirs)),
        };

        a.into_iter().chain(b)
    }

    fn from_vec(mut parents: Vec<ObjectId>) -> Result<Parents> {
        match parents.len() {
            0 => Ok(Parents::None),
            1 => Ok(Parents::One(parents.remove(0))),
            2 => {
                let theirs = parents.remove(1);
                let ours = parents.remove(0);
                Ok(Parents::Two { ours, theirs })
            }
            n => Err(JitError::malformed(
                "commit",
                format!("{n} parent lines, at most 2 supported"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    oid: ObjectId,
    tree_oid: ObjectId,
    parents: Parents,
    timestamp: DateTime<Utc>,
    message: String,
}

impl Commit {
    /// Create a commit; the id is computed from the serialization.
    pub fn new(
        tree_oid: ObjectId,
        parents: Parents,
        timestamp: DateTime<Utc>,
        message: String,
    ) -> Commit {
        let body = Self::render(&tree_oid, &parents, &timestamp, &message);
        let oid = ObjectId::hash(body.as_bytes());

        Commit {
            oid,
            tree_oid,
            parents,
            timestamp,
            message,
        }
    }

    /// Parse the serialized form. Header lines run until the first blank
    /// line; the remainder is the message with its trailing newline
    /// dropped.
    pub fn parse(oid: ObjectId, data: &Bytes) -> Result<Commit> {
        let text = std::str::from_utf8(data)
            .map_err(|_| JitError::malformed("commit", "not valid utf-8"))?;

        let mut tree_oid = None;
        let mut parents = Vec::new();
        let mut timestamp = None;

        let mut lines = text.lines();
        for line in lines.by_ref() {
            if line.is_empty() {
                break;
            }

            if let Some(tree) = line.strip_prefix("tree ") {
                tree_oid = Some(ObjectId::try_parse(tree.trim())?);
            } else if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.trim())?);
            } else if let Some(seconds) = line.strip_prefix("timestamp ") {
                let seconds: i64 = seconds
                    .trim()
                    .parse()
                    .map_err(|_| JitError::malformed("commit", "invalid timestamp"))?;
                timestamp = DateTime::from_timestamp(seconds, 0);
            } else {
                return Err(JitError::malformed(
                    "commit",
                    format!("unknown header line '{line}'"),
                ));
            }
        }

        let message = lines.collect::<Vec<_>>().join("\n");

        Ok(Commit {
            oid,
            tree_oid: tree_oid
                .ok_or_else(|| JitError::malformed("commit", "missing tree line"))?,
            parents: Parents::from_vec(parents)?,
            timestamp: timestamp
                .ok_or_else(|| JitError::malformed("commit", "missing timestamp line"))?,
            message,
        })
    }

    pub fn serialize(&self) -> Bytes {
        Bytes::from(Self::render(
            &self.tree_oid,
            &self.parents,
            &self.timestamp,
            &self.message,
        ))
    }

    fn render(
        tree_oid: &ObjectId,
        parents: &Parents,
        timestamp: &DateTime<Utc>,
        message: &str,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("tree {tree_oid}\n"));
        for parent in parents.iter() {
            out.push_str(&format!("parent {parent}\n"));
        }
        out.push_str(&format!("timestamp {}\n", timestamp.timestamp()));
        out.push('\n');
        out.push_str(message);
        out.push('\n');

        out
    }

    pub fn object_id(&self) -> &ObjectId {
        &self.oid
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parents(&self) -> &Parents {
        &self.parents
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First message line, for one-line displays.
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
