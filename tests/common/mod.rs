#![allow(dead_code)]

pub mod command;
pub mod file;

use std::path::Path;

/// Read a branch ref file and return the commit hash it holds.
pub fn read_ref(dir: &Path, branch: &str) -> String {
    let ref_path = dir.join(".jit").join("refs").join("heads").join(branch);
    std::fs::read_to_string(ref_path)
        .expect("ref file should exist")
        .trim()
        .to_string()
}

/// Raw content of the HEAD file.
pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".jit").join("HEAD")).expect("HEAD should exist")
}

/// Raw serialized form of an object in the store.
pub fn read_object(dir: &Path, hash: &str) -> String {
    let object_path = dir.join(".jit").join("objects").join(hash);
    std::fs::read_to_string(object_path).expect("object should exist")
}

/// Tree hash recorded by a commit object.
pub fn tree_of_commit(dir: &Path, commit_hash: &str) -> String {
    read_object(dir, commit_hash)
        .lines()
        .find_map(|line| line.strip_prefix("tree "))
        .expect("commit should have a tree line")
        .to_string()
}

/// Parent hashes recorded by a commit object, in order.
pub fn parents_of_commit(dir: &Path, commit_hash: &str) -> Vec<String> {
    read_object(dir, commit_hash)
        .lines()
        .filter_map(|line| line.strip_prefix("parent "))
        .map(str::to_string)
        .collect()
}

pub fn assert_full_hash(hash: &str) {
    assert_eq!(hash.len(), 40, "not a full hash: {hash}");
    assert!(
        hash.chars().all(|c| c.is_ascii_hexdigit()),
        "not hex: {hash}"
    );
}
