//! Git access for tag enumeration, cloning, and signature checks.
//!
//! Everything sits behind a narrow capability trait so orchestration can
//! run against a fake; the real implementation drives the system git
//! binary for transport and libgit2 for local object-store reads.

mod access;
mod cli;
mod keyring;

pub use access::GitAccess;
pub use cli::GitCli;
pub use keyring::Keyring;
