//! Verified clone orchestration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::git::{GitAccess, GitCli, Keyring};
use crate::source::ResolvedSource;
use crate::version::match_tag;

/// Progress states of one fetch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchState {
    Pending,
    TryingRemote(usize),
    Cloned,
    Verifying,
    Verified,
}

/// Outcome of a verified fetch: where the checkout lives and which
/// revision passed verification.
#[derive(Debug, Clone, Serialize)]
pub struct CloneOutcome {
    /// Destination work tree
    pub path: PathBuf,
    /// Mirror the content was actually cloned from
    pub origin: String,
    /// Tag selected by version matching
    pub tag: String,
    /// Revision id the tag resolved to
    pub revision: String,
}

/// Clones one of a source's candidate mirrors and verifies the resolved
/// revision before reporting success.
#[derive(Debug, Default)]
pub struct Fetcher<G = GitCli> {
    git: G,
}

impl Fetcher<GitCli> {
    /// Fetcher over the system git binary.
    pub fn new() -> Self {
        Self { git: GitCli::new() }
    }
}

impl<G: GitAccess> Fetcher<G> {
    /// Fetcher over a specific git implementation.
    pub fn with_git(git: G) -> Self {
        Self { git }
    }

    /// Clone `source` into `destination` and verify the revision matching
    /// its version range.
    ///
    /// Candidates are tried strictly in order; the first transport success
    /// is used and later mirrors are never contacted. Integrity is checked
    /// after selection, and a signature failure terminates the operation
    /// without falling back: it indicts the content, not the transport.
    ///
    /// On a verification failure the destination is left on disk for
    /// inspection and must be treated as untrusted. A directory the caller
    /// created beforehand is never deleted; only the partial state of a
    /// failed transport attempt is removed before the next mirror is
    /// tried.
    pub fn fetch(
        &self,
        source: &ResolvedSource,
        destination: &Path,
        keys: &Keyring,
    ) -> Result<CloneOutcome> {
        let mut state = FetchState::Pending;
        debug!(?state, candidates = source.git.len(), "starting fetch");

        let preexisting = destination.exists();
        let mut attempts: Vec<(String, String)> = Vec::new();
        let mut origin = None;
        for (index, location) in source.git.iter().enumerate() {
            state = FetchState::TryingRemote(index);
            debug!(?state, location = %location, "trying candidate remote");
            match self.git.clone_repo(location, destination) {
                Ok(()) => {
                    origin = Some(location.clone());
                    break;
                }
                Err(err) => {
                    warn!(location = %location, error = %err, "candidate remote failed");
                    attempts.push((location.clone(), err.to_string()));
                    // A partial clone would poison the next attempt.
                    if !preexisting && destination.exists() {
                        fs::remove_dir_all(destination)?;
                    }
                }
            }
        }
        let origin = match origin {
            Some(origin) => origin,
            None => return Err(Error::AllRemotesUnreachable { attempts }),
        };

        state = FetchState::Cloned;
        debug!(?state, origin = %origin, "transport complete");

        let tags = self.git.list_tags(&destination.to_string_lossy())?;
        let tag = match_tag(&tags, &source.version)?
            .ok_or_else(|| Error::NoMatchingVersion {
                range: source.version.clone(),
            })?
            .to_string();
        let revision = self.git.checkout(destination, &tag)?;

        state = FetchState::Verifying;
        debug!(?state, tag = %tag, revision = %revision, "verifying signature");
        self.git.verify_tag(destination, &tag, keys)?;

        state = FetchState::Verified;
        info!(
            ?state,
            tag = %tag,
            revision = %revision,
            path = %destination.display(),
            "fetch verified"
        );
        Ok(CloneOutcome {
            path: destination.to_path_buf(),
            origin,
            tag,
            revision,
        })
    }
}
