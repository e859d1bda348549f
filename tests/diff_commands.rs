use assert_fs::TempDir;
use predicates::prelude::predicate;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;

mod common;

use common::command::{committed_repository_dir, jit_commit, run_jit_command};
use common::file::{FileSpec, write_file};
use common::read_ref;

/// Two commits: the fixture's `first` (a.txt = "hello\n") and a `second`
/// that edits a.txt, adds b.txt and keeps c.txt untouched.
fn two_commits(dir: &std::path::Path) -> (String, String) {
    write_file(FileSpec::new(dir.join("c.txt"), "constant\n".to_string()));
    run_jit_command(dir, &["add", "."]).assert().success();
    jit_commit(dir, "with c").assert().success();
    let first = read_ref(dir, "master");

    write_file(FileSpec::new(dir.join("a.txt"), "hello world\n".to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), "brand new\n".to_string()));
    run_jit_command(dir, &["add", "."]).assert().success();
    jit_commit(dir, "second").assert().success();
    let second = read_ref(dir, "master");

    (first, second)
}

#[rstest]
fn diff_shows_modified_and_added_files(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let (first, second) = two_commits(dir.path());

    run_jit_command(dir.path(), &["diff", &first, &second])
        .assert()
        .success()
        .stdout(predicate::str::contains("Difference in 'a.txt':"))
        .stdout(predicate::str::contains("-hello"))
        .stdout(predicate::str::contains("+hello world"))
        .stdout(predicate::str::contains("Difference in 'b.txt':"))
        .stdout(predicate::str::contains("+brand new"))
        .stdout(predicate::str::contains("Difference in 'c.txt':").not());
}

#[rstest]
fn diff_in_reverse_shows_the_deletion(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let (first, second) = two_commits(dir.path());

    run_jit_command(dir.path(), &["diff", &second, &first])
        .assert()
        .success()
        .stdout(predicate::str::contains("-brand new"));
}

#[rstest]
fn diff_of_a_commit_with_itself_is_empty(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let tip = read_ref(dir.path(), "master");

    run_jit_command(dir.path(), &["diff", &tip, &tip])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[rstest]
fn diff_rejects_a_malformed_hash(committed_repository_dir: TempDir) {
    let dir = committed_repository_dir;
    let tip = read_ref(dir.path(), "master");

    run_jit_command(dir.path(), &["diff", "nothex", &tip])
        .assert()
        .failure();
}
