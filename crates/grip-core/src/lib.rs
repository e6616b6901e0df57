//! Grip Core Library
//!
//! Resolves symbolic package source specifiers into verified git checkouts:
//! mirror expansion, tag enumeration, semver range matching, and cloning
//! with signature verification of the resolved revision.

pub mod error;
pub mod fetch;
pub mod git;
pub mod source;
pub mod version;

pub use error::{Error, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Errors
    pub use crate::error::{Error, Result};

    // Fetching
    pub use crate::fetch::{CloneOutcome, Fetcher};

    // Git access
    pub use crate::git::{GitAccess, GitCli, Keyring};

    // Sources
    pub use crate::source::{MirrorRegistry, ResolvedSource, SourceSpec};

    // Version matching
    pub use crate::version::match_tag;
}
