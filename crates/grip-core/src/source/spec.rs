//! Source specifier types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed `scheme:path@range` source specifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Resolution scheme (e.g. "github", "onion", "file")
    pub scheme: String,
    /// Repository path within the scheme (e.g. "org/repo")
    pub path: String,
    /// Version range, captured verbatim (e.g. "^1.2.3")
    pub range: String,
}

impl SourceSpec {
    /// Parse a `scheme:path@range` specifier.
    ///
    /// The scheme ends at the first `:` and the range starts at the last
    /// `@`, so the path segment may itself contain `:` or `@` (ssh-style
    /// mirror paths).
    pub fn parse(input: &str) -> Result<Self> {
        let malformed = || Error::MalformedSpecifier {
            spec: input.to_string(),
        };
        let (scheme, rest) = input.split_once(':').ok_or_else(malformed)?;
        let (path, range) = rest.rsplit_once('@').ok_or_else(malformed)?;
        if scheme.is_empty() || path.is_empty() || range.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            scheme: scheme.to_string(),
            path: path.to_string(),
            range: range.to_string(),
        })
    }
}

/// Ordered candidate locations for one logical repository, plus the
/// version range to resolve against its tags.
///
/// All candidates are expected to host identical content; their order is
/// the registry's fallback priority and is never reordered or deduplicated
/// here. Locations are not validated or contacted until used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSource {
    /// Fully-qualified repository locations, one per mirror
    pub git: Vec<String>,
    /// Version range, unvalidated until matching
    pub version: String,
}
