use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const COMMIT_DATE: &str = "2024-01-01 12:00:00 +0000";
pub const READABLE_COMMIT_DATE: &str = "Mon Jan 1 12:00:00 2024 +0000";

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose `master` holds one commit tracking `foo.txt` ("A")
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    write_file(FileSpec::new(
        repository_dir.path().join("foo.txt"),
        "A".to_string(),
    ));
    run_gitlet_command(repository_dir.path(), &["add", "foo.txt"])
        .assert()
        .success();
    gitlet_commit(repository_dir.path(), "first")
        .assert()
        .success();

    repository_dir
}

pub fn run_gitlet_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("gitlet").expect("Failed to find gitlet binary");
    cmd.env_remove("GITLET_LOG");
    cmd.env("GITLET_DATE", COMMIT_DATE);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn gitlet_commit(dir: &Path, message: &str) -> Command {
    run_gitlet_command(dir, &["commit", message])
}

/// Stage `path` with `content` and commit it
pub fn commit_file(dir: &Path, path: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(path), content.to_string()));
    run_gitlet_command(dir, &["add", path]).assert().success();
    gitlet_commit(dir, message).assert().success();
}

/// Full IDs of the commits whose message is exactly `message`
pub fn find_commits(dir: &Path, message: &str) -> Vec<String> {
    let output = run_gitlet_command(dir, &["find", message])
        .output()
        .expect("Failed to run find");
    if !output.status.success() {
        return Vec::new();
    }

    String::from_utf8(output.stdout)
        .expect("find output is not UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn find_commit(dir: &Path, message: &str) -> String {
    let mut ids = find_commits(dir, message);
    assert_eq!(ids.len(), 1, "expected exactly one commit named {message:?}");
    ids.remove(0)
}
