use std::fs;

use tempfile::TempDir;

use grip_core::error::Error;
use grip_core::git::{GitAccess, GitCli};

mod support;

#[test]
fn lists_tags_from_a_local_repository() {
    let temp = TempDir::new().unwrap();
    support::git::tagged_fixture(temp.path());

    let tags = GitCli::new()
        .list_tags(temp.path().to_str().unwrap())
        .unwrap();

    assert_eq!(tags, vec!["v1.0.0", "v1.1.0", "v2.0.0"]);
}

#[test]
fn listing_is_restartable() {
    let temp = TempDir::new().unwrap();
    support::git::tagged_fixture(temp.path());
    let git = GitCli::new();

    let first = git.list_tags(temp.path().to_str().unwrap()).unwrap();
    let second = git.list_tags(temp.path().to_str().unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn plain_directory_is_not_a_repository() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("README"), "not a repo").unwrap();

    let result = GitCli::new().list_tags(temp.path().to_str().unwrap());

    assert!(matches!(result, Err(Error::NotAGitRepository { .. })));
}

#[test]
fn missing_path_is_unreachable() {
    let result = GitCli::new().list_tags("/nonexistent/grip-missing-repo");

    assert!(matches!(result, Err(Error::UnreachableRepository { .. })));
}
