use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{committed_repository_dir, jit_commit, repository_dir, run_jit_command};
use common::file::{FileSpec, write_file};
use common::{assert_full_hash, parents_of_commit, read_object, read_ref, tree_of_commit};

#[rstest]
fn first_commit_creates_the_master_ref(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    let commit_hash = read_ref(dir.path(), "master");
    assert_full_hash(&commit_hash);

    let commit_text = read_object(dir.path(), &commit_hash);
    assert!(commit_text.starts_with("tree "));
    assert!(!commit_text.contains("parent "));
    assert!(commit_text.contains("timestamp "));
    assert!(commit_text.ends_with("\nfirst\n"));

    // the recorded tree is itself stored and lists the staged file
    let tree_hash = tree_of_commit(dir.path(), &commit_hash);
    let tree_text = read_object(dir.path(), &tree_hash);
    assert!(tree_text.contains(" blob a.txt "));
}

#[rstest]
fn second_commit_links_to_the_first(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let first_hash = read_ref(dir.path(), "master");
    let first_tree = tree_of_commit(dir.path(), &first_hash);

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "hello world\n".to_string(),
    ));
    run_jit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jit_commit(dir.path(), "second").assert().success();

    let second_hash = read_ref(dir.path(), "master");
    assert_ne!(second_hash, first_hash);
    assert_eq!(parents_of_commit(dir.path(), &second_hash), vec![first_hash]);

    let second_tree = tree_of_commit(dir.path(), &second_hash);
    assert_ne!(second_tree, first_tree);

    // both blob generations persist in the store
    let old_blob = read_object(dir.path(), &sha1_hex(b"hello\n"));
    let new_blob = read_object(dir.path(), &sha1_hex(b"hello world\n"));
    assert_eq!(old_blob, "hello\n");
    assert_eq!(new_blob, "hello world\n");
}

#[rstest]
fn commit_with_empty_index_fails(repository_dir: TempDir) {
    let dir = repository_dir;
    run_jit_command(dir.path(), &["init"]).assert().success();

    jit_commit(dir.path(), "nothing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no files staged"));
}

#[rstest]
fn committing_a_nested_project_stores_every_subtree(repository_dir: TempDir) {
    let dir = repository_dir;
    run_jit_command(dir.path(), &["init"]).assert().success();

    write_file(FileSpec::new(
        dir.path().join("a").join("b").join("deep.txt"),
        "deep\n".to_string(),
    ));
    run_jit_command(dir.path(), &["add", "."]).assert().success();
    jit_commit(dir.path(), "nested").assert().success();

    let commit_hash = read_ref(dir.path(), "master");
    let root_tree = read_object(dir.path(), &tree_of_commit(dir.path(), &commit_hash));

    // walk the stored hierarchy: root -> a -> b -> blob
    let a_hash = entry_hash(&root_tree, "a");
    let a_tree = read_object(dir.path(), &a_hash);
    let b_hash = entry_hash(&a_tree, "b");
    let b_tree = read_object(dir.path(), &b_hash);
    let blob_hash = entry_hash(&b_tree, "deep.txt");

    assert_eq!(read_object(dir.path(), &blob_hash), "deep\n");
}

/// Extract the child hash of a named entry from a stored tree.
fn entry_hash(tree_text: &str, name: &str) -> String {
    tree_text
        .lines()
        .find_map(|line| {
            let mut parts = line.splitn(4, ' ');
            let _mode = parts.next()?;
            let _kind = parts.next()?;
            let entry_name = parts.next()?;
            let hash = parts.next()?;
            (entry_name == name).then(|| hash.to_string())
        })
        .unwrap_or_else(|| panic!("entry '{name}' not found in tree:\n{tree_text}"))
}

fn sha1_hex(data: &[u8]) -> String {
    use sha1::{Digest, Sha1};
    let mut hasher = Sha1::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
