use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

use common::command::{committed_repository_dir, jit_commit, run_jit_command};
use common::file::{FileSpec, write_file};
use common::read_ref;

#[rstest]
fn log_prints_history_newest_first(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let first_hash = read_ref(dir.path(), "master");

    write_file(FileSpec::new(
        dir.path().join("a.txt"),
        "hello world\n".to_string(),
    ));
    run_jit_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jit_commit(dir.path(), "second").assert().success();
    let second_hash = read_ref(dir.path(), "master");

    let output = run_jit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first"))
        .stdout(predicate::str::contains("second"))
        .get_output()
        .stdout
        .clone();
    let output = String::from_utf8(output).unwrap();

    let second_pos = output.find(&second_hash).expect("second commit in log");
    let first_pos = output.find(&first_hash).expect("first commit in log");
    assert!(second_pos < first_pos, "newest commit should come first");
}

#[rstest]
fn log_shows_the_commit_message_indented(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;

    run_jit_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    first"))
        .stdout(predicate::str::contains("Date:"));
}
