//! Git access backed by the system git binary and libgit2.

use std::path::Path;
use std::process::Command;

use git2::Repository;
use tracing::debug;
use url::Url;

use super::access::GitAccess;
use super::keyring::Keyring;
use crate::error::{Error, Result};

/// Git access via the installed `git` binary for transport and libgit2
/// for local object-store reads.
///
/// Remote transport (https, ssh, onion endpoints reached through the
/// user's ssh/proxy configuration) is entirely git's own; this type only
/// drives it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl GitCli {
    pub fn new() -> Self {
        Self
    }

    fn list_remote_tags(&self, location: &str) -> Result<Vec<String>> {
        debug!(location = %location, "listing remote tags");
        let output = Command::new("git")
            .args(["ls-remote", "--tags", location])
            .output()?;
        if !output.status.success() {
            return Err(Error::UnreachableRepository {
                location: location.to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(parse_ls_remote(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl GitAccess for GitCli {
    fn list_tags(&self, location: &str) -> Result<Vec<String>> {
        if is_remote_location(location) {
            self.list_remote_tags(location)
        } else {
            list_local_tags(Path::new(location))
        }
    }

    fn clone_repo(&self, location: &str, destination: &Path) -> Result<()> {
        debug!(location = %location, destination = %destination.display(), "cloning");
        let output = Command::new("git")
            .arg("clone")
            .arg("--quiet")
            .arg(location)
            .arg(destination)
            .output()?;
        if !output.status.success() {
            return Err(Error::UnreachableRepository {
                location: location.to_string(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    fn checkout(&self, workdir: &Path, tag: &str) -> Result<String> {
        let output = Command::new("git")
            .args(["checkout", "--quiet", tag])
            .current_dir(workdir)
            .output()?;
        if !output.status.success() {
            return Err(Error::GitOperation {
                operation: format!("checkout {tag}"),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let repo = Repository::open(workdir)?;
        Ok(repo.revparse_single("HEAD")?.id().to_string())
    }

    fn verify_tag(&self, workdir: &Path, tag: &str, keys: &Keyring) -> Result<()> {
        debug!(tag = %tag, keyring = %keys.home().display(), "verifying tag signature");
        let output = Command::new("git")
            .args(["verify-tag", tag])
            .env("GNUPGHOME", keys.home())
            .current_dir(workdir)
            .output()?;
        if !output.status.success() {
            return Err(Error::SignatureVerificationFailed {
                tag: tag.to_string(),
                destination: workdir.to_path_buf(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// URLs are remote; everything else is a local path.
pub(super) fn is_remote_location(location: &str) -> bool {
    Url::parse(location).is_ok()
}

fn list_local_tags(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(Error::UnreachableRepository {
            location: path.display().to_string(),
            detail: "no such path".to_string(),
        });
    }
    let repo = Repository::open(path).map_err(|_| Error::NotAGitRepository {
        path: path.to_path_buf(),
    })?;
    let names = repo.tag_names(None)?;
    Ok(names.iter().flatten().map(str::to_string).collect())
}

/// Extract tag names from `git ls-remote --tags` output, dropping peeled
/// `^{}` entries.
pub(super) fn parse_ls_remote(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| {
            let name = line.split_whitespace().nth(1)?.strip_prefix("refs/tags/")?;
            (!name.ends_with("^{}")).then(|| name.to_string())
        })
        .collect()
}
