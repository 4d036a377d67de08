use crate::common::command::{
    READABLE_COMMIT_DATE, find_commit, repository_dir, run_gitlet_command,
};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

mod common;

#[rstest]
fn init_creates_metadata_directory(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;

    run_gitlet_command(dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dir.path().join(".gitlet").is_dir());
    assert!(dir.path().join(".gitlet").join("objects").is_dir());
    assert!(dir.path().join(".gitlet").join("session").is_file());

    Ok(())
}

#[rstest]
fn init_records_the_initial_commit_on_master(
    repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();

    let initial = find_commit(dir.path(), "initial commit");
    let expected = format!("===\ncommit {initial}\nDate: {READABLE_COMMIT_DATE}\ninitial commit\n\n");

    run_gitlet_command(dir.path(), &["log"])
        .assert()
        .success()
        .stdout(expected);
    run_gitlet_command(dir.path(), &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("=== Branches ===\n*master\n\n"));

    Ok(())
}

#[rstest]
fn init_twice_is_rejected(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_dir;
    run_gitlet_command(dir.path(), &["init"]).assert().success();

    run_gitlet_command(dir.path(), &["init"])
        .assert()
        .code(1)
        .stdout("A Gitlet version-control system already exists in the current directory.\n");

    Ok(())
}

#[rstest]
#[case::log(&["log"])]
#[case::status(&["status"])]
#[case::add(&["add", "foo.txt"])]
#[case::branch(&["branch", "other"])]
fn commands_require_an_initialized_repository(
    repository_dir: TempDir,
    #[case] args: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .code(1)
        .stdout("Not in an initialized Gitlet directory.\n");

    assert!(!repository_dir.path().join(".gitlet").exists());

    Ok(())
}

#[rstest]
#[case::no_command(&[], "Please enter a command.\n")]
#[case::unknown_command(&["push"], "No command with that name exists.\n")]
#[case::missing_operand(&["add"], "Incorrect operands.\n")]
#[case::extra_operand(&["log", "extra"], "Incorrect operands.\n")]
#[case::checkout_without_target(&["checkout"], "Incorrect operands.\n")]
fn malformed_command_lines_are_rejected(
    repository_dir: TempDir,
    #[case] args: &[&str],
    #[case] message: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    run_gitlet_command(repository_dir.path(), args)
        .assert()
        .code(1)
        .stdout(message.to_string());

    Ok(())
}
