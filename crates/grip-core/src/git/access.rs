//! Capability surface over git.

use std::path::Path;

use super::keyring::Keyring;
use crate::error::Result;

/// The git operations the verified cloner needs.
///
/// Implementations own transport (https, ssh, local filesystem); callers
/// never see the wire protocol. `checkout` returns the revision id the tag
/// resolved to so verification results bind to a concrete object.
pub trait GitAccess {
    /// List every tag name visible at `location` (a local path or a
    /// remote URL), in the order the reference listing returns them.
    ///
    /// Restartable: no cursor state persists between calls.
    fn list_tags(&self, location: &str) -> Result<Vec<String>>;

    /// Clone the repository at `location` into `destination`.
    fn clone_repo(&self, location: &str, destination: &Path) -> Result<()>;

    /// Check out `tag` in the work tree at `workdir`, returning the
    /// revision id it points at.
    fn checkout(&self, workdir: &Path, tag: &str) -> Result<String>;

    /// Verify the signature bound to `tag` against the trusted keyring.
    fn verify_tag(&self, workdir: &Path, tag: &str, keys: &Keyring) -> Result<()>;
}
