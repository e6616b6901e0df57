//! Error taxonomy for source expansion, tag resolution, and cloning.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while expanding, resolving, and cloning package sources.
///
/// Transport conditions (`UnreachableRepository`, `AllRemotesUnreachable`)
/// may be retried later; `SignatureVerificationFailed` is a property of the
/// content itself and is never retried against another mirror.
#[derive(Debug, Error)]
pub enum Error {
    /// Specifier does not match the `scheme:path@range` shape.
    #[error("malformed source specifier '{spec}': expected scheme:path@range")]
    MalformedSpecifier { spec: String },

    /// Specifier names a scheme the mirror registry does not know.
    #[error("unknown source scheme '{scheme}'")]
    UnknownScheme { scheme: String },

    /// Version range failed to parse as a semver constraint.
    #[error("invalid version range '{range}': {detail}")]
    InvalidRange { range: String, detail: String },

    /// A single repository location could not be reached.
    #[error("unreachable repository {location}: {detail}")]
    UnreachableRepository { location: String, detail: String },

    /// A local path exists but is not a git object store.
    #[error("not a git repository: {}", path.display())]
    NotAGitRepository { path: PathBuf },

    /// Every candidate mirror failed at the transport level.
    #[error("all {} candidate remotes unreachable", attempts.len())]
    AllRemotesUnreachable {
        /// (location, failure detail) per attempted mirror, in try order
        attempts: Vec<(String, String)>,
    },

    /// No tag in the repository satisfies the requested range.
    #[error("no tag matching version range '{range}'")]
    NoMatchingVersion { range: String },

    /// The signature bound to the resolved revision did not verify against
    /// the trusted keyring. The destination is left on disk and must be
    /// treated as untrusted.
    #[error("signature verification failed for tag '{tag}' in {}: {detail}", destination.display())]
    SignatureVerificationFailed {
        tag: String,
        destination: PathBuf,
        detail: String,
    },

    /// Trusted key material could not be imported into a keyring.
    #[error("failed to import key {}: {detail}", path.display())]
    KeyImport { path: PathBuf, detail: String },

    /// A git invocation failed for a reason other than transport.
    #[error("git {operation} failed: {detail}")]
    GitOperation { operation: String, detail: String },

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
