use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, Signature};

fn signature() -> Signature<'static> {
    Signature::now("grip tests", "tests@grip.invalid").unwrap()
}

pub fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = signature();
    let head = repo.head();

    match head {
        Ok(head) => {
            let parent = repo.find_commit(head.target().unwrap()).unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&parent])
                .unwrap()
        }
        Err(_) => repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &[])
            .unwrap(),
    }
}

/// Annotated tag on the current HEAD commit.
pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().target().unwrap();
    let target = repo.find_object(head, None).unwrap();
    repo.tag(name, &target, &signature(), &format!("release {name}"), false)
        .unwrap();
}

/// Fixture repository at `dir` with tags v1.0.0, v1.1.0, and v2.0.0, each
/// on its own commit.
pub fn tagged_fixture(dir: &Path) -> Repository {
    let repo = Repository::init(dir).unwrap();

    for (release, tag) in [("1.0.0", "v1.0.0"), ("1.1.0", "v1.1.0"), ("2.0.0", "v2.0.0")] {
        fs::write(dir.join("VERSION"), release).unwrap();
        commit_all(&repo, &format!("release {release}"));
        tag_head(&repo, tag);
    }

    repo
}
