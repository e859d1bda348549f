//! Merge-base finder
//!
//! Finds the common ancestor used as the base of a three-way merge.
//! Ancestry is computed over the full commit DAG: every parent of a merge
//! commit is followed, not just the first one. The base is the first
//! commit, in breadth-first order from `theirs`, that is also an ancestor
//! of `ours` (a commit counts as its own ancestor).

use crate::areas::database::Database;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{JitError, Result};
use std::collections::{HashSet, VecDeque};

pub fn find_merge_base(
    database: &Database,
    ours: &ObjectId,
    theirs: &ObjectId,
) -> Result<ObjectId> {
    let our_ancestors = ancestors(database, ours)?;

    let mut queue = VecDeque::from([theirs.clone()]);
    let mut seen = HashSet::from([theirs.clone()]);

    while let Some(oid) = queue.pop_front() {
        if our_ancestors.contains(&oid) {
            return Ok(oid);
        }

        let commit = database.load_commit(&oid)?;
        for parent in commit.parents().iter() {
            if seen.insert(parent.clone()) {
                queue.push_back(parent.clone());
            }
        }
    }

    Err(JitError::NoCommonAncestor)
}

/// Every commit reachable from `from` through any parent link, `from`
/// included.
fn ancestors(database: &Database, from: &ObjectId) -> Result<HashSet<ObjectId>> {
    let mut reachable = HashSet::from([from.clone()]);
    let mut queue = VecDeque::from([from.clone()]);

    while let Some(oid) = queue.pop_front() {
        let commit = database.load_commit(&oid)?;
        for parent in commit.parents().iter() {
            if reachable.insert(parent.clone()) {
                queue.push_back(parent.clone());
            }
        }
    }

    Ok(reachable)
}
