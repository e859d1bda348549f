use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{repository_dir, run_jit_command};
use common::read_head;

#[rstest]
fn init_creates_the_repository_layout(repository_dir: TempDir) {
    let dir = repository_dir;

    run_jit_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized empty jit repository"));

    let jit = dir.path().join(".jit");
    assert!(jit.is_dir());
    assert!(jit.join("objects").is_dir());
    assert!(jit.join("refs").join("heads").is_dir());
    assert_eq!(read_head(dir.path()), "ref: refs/heads/master\n");

    // no commit yet, so no branch ref file
    assert!(!jit.join("refs").join("heads").join("master").exists());
}

#[rstest]
fn init_refuses_to_reinitialize(repository_dir: TempDir) {
    let dir = repository_dir;

    run_jit_command(dir.path(), &["init"]).assert().success();
    run_jit_command(dir.path(), &["init"]).assert().failure();
}
