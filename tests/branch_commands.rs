use crate::common::command::{
    commit_file, find_commit, init_repository_dir, run_gitlet_command,
};
use crate::common::file::{FileSpec, read_file, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

#[rstest]
fn branch_is_created_without_switching(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_gitlet_command(dir, &["branch", "feature/login"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\nfeature/login\n*master\n\n",
        ));

    Ok(())
}

#[rstest]
fn duplicate_branch_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    run_gitlet_command(dir, &["branch", "other"])
        .assert()
        .code(1)
        .stdout("A branch with that name already exists.\n");
    run_gitlet_command(dir, &["branch", "master"])
        .assert()
        .code(1)
        .stdout("A branch with that name already exists.\n");

    Ok(())
}

#[rstest]
#[case::double_dot("a..b")]
#[case::lock_suffix("topic.lock")]
#[case::trailing_slash("topic/")]
#[case::leading_dot(".hidden")]
fn invalid_branch_names_are_rejected(
    init_repository_dir: TempDir,
    #[case] name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["branch", name])
        .assert()
        .code(1)
        .stdout(format!("Invalid branch name: {name}.\n"));

    Ok(())
}

#[rstest]
fn removing_branches(init_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();

    run_gitlet_command(dir, &["rm-branch", "master"])
        .assert()
        .code(1)
        .stdout("Cannot remove the current branch.\n");
    run_gitlet_command(dir, &["rm-branch", "missing"])
        .assert()
        .code(1)
        .stdout("A branch with that name does not exist.\n");

    run_gitlet_command(dir, &["rm-branch", "other"])
        .assert()
        .success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .code(1)
        .stdout("A branch with that name does not exist.\n");

    // the commits stay reachable by ID
    find_commit(dir, "first");

    Ok(())
}

#[rstest]
fn checkout_branch_swaps_working_files(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    commit_file(dir, "master.txt", "on master", "master only");
    commit_file(dir, "foo.txt", "master foo", "edit foo");

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!dir.join("master.txt").exists());
    assert_eq!(read_file(&dir.join("foo.txt")), "A");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\nmaster\n*other\n\n",
        ));

    commit_file(dir, "other.txt", "on other", "other only");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();

    assert!(!dir.join("other.txt").exists());
    assert_eq!(read_file(&dir.join("master.txt")), "on master");
    assert_eq!(read_file(&dir.join("foo.txt")), "master foo");

    Ok(())
}

#[rstest]
fn checkout_current_branch_is_rejected(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_gitlet_command(init_repository_dir.path(), &["checkout", "master"])
        .assert()
        .code(1)
        .stdout("No need to checkout the current branch.\n");

    Ok(())
}

#[rstest]
fn checkout_refuses_to_overwrite_untracked_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_file(dir, "shared.txt", "from other", "add shared");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    assert!(!dir.join("shared.txt").exists());

    write_file(FileSpec::new(dir.join("shared.txt"), "local".to_string()));
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .code(1)
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.join("shared.txt")), "local");
    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "=== Branches ===\n*master\nother\n\n",
        ));

    Ok(())
}

#[rstest]
fn checkout_branch_clears_staging(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    write_file(FileSpec::new(dir.join("pending.txt"), "p".to_string()));
    run_gitlet_command(dir, &["add", "pending.txt"]).assert().success();

    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();

    run_gitlet_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Staged Files ===\n\n"))
        .stdout(predicate::str::contains(
            "=== Untracked Files ===\npending.txt\n\n",
        ));

    Ok(())
}

#[rstest]
fn checkout_keeps_untracked_files_where_the_branch_has_a_file(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();
    run_gitlet_command(dir, &["branch", "other"]).assert().success();
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    commit_file(dir, "docs", "a file on other", "docs as file");
    run_gitlet_command(dir, &["checkout", "master"])
        .assert()
        .success();
    assert!(!dir.join("docs").exists());

    write_file(FileSpec::new(dir.join("docs/notes.txt"), "notes".to_string()));
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .code(1)
        .stdout("There is an untracked file in the way; delete it, or add and commit it first.\n");

    assert_eq!(read_file(&dir.join("docs/notes.txt")), "notes");

    std::fs::remove_dir_all(dir.join("docs"))?;
    run_gitlet_command(dir, &["checkout", "other"])
        .assert()
        .success();
    assert_eq!(read_file(&dir.join("docs")), "a file on other");

    Ok(())
}
