use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository with one committed file (`a.txt` = "hello\n") on master.
#[fixture]
pub fn committed_repository_dir(repository_dir: TempDir) -> TempDir {
    run_jit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello\n".to_string(),
    ));

    run_jit_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();
    jit_commit(repository_dir.path(), "first").assert().success();

    repository_dir
}

pub fn run_jit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("jit").expect("Failed to find jit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn jit_commit(dir: &Path, message: &str) -> Command {
    run_jit_command(dir, &["commit", "-m", message])
}
