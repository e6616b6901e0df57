//! Mirror registry and specifier expansion.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::spec::{ResolvedSource, SourceSpec};
use crate::error::{Error, Result};

/// Scheme reserved for mirrors that are local base directories.
const FILE_SCHEME: &str = "file";

/// Ordered mirror locations per resolution scheme.
///
/// Mirror order encodes fallback priority and is external policy: the
/// registry is loaded once by the caller and treated as read-only here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MirrorRegistry {
    schemes: BTreeMap<String, Vec<String>>,
}

impl MirrorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the standard public forges.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert("github", ["https://github.com"]);
        registry.insert("gitlab", ["https://gitlab.com"]);
        registry
    }

    /// Register the ordered mirror list for a scheme, replacing any
    /// previous entry.
    pub fn insert(
        &mut self,
        scheme: impl Into<String>,
        mirrors: impl IntoIterator<Item = impl Into<String>>,
    ) {
        self.schemes
            .insert(scheme.into(), mirrors.into_iter().map(Into::into).collect());
    }

    /// The ordered mirror list for a scheme, if registered.
    pub fn mirrors(&self, scheme: &str) -> Option<&[String]> {
        self.schemes.get(scheme).map(Vec::as_slice)
    }

    /// Expand a `scheme:path@range` specifier into one candidate location
    /// per mirror, in registry order.
    ///
    /// Pure: identical registry and specifier always produce an identical
    /// [`ResolvedSource`]. A scheme with an empty mirror list is treated
    /// as unknown, so a successful expansion always carries at least one
    /// candidate.
    pub fn expand(&self, specifier: &str) -> Result<ResolvedSource> {
        let spec = SourceSpec::parse(specifier)?;
        let mirrors = self
            .mirrors(&spec.scheme)
            .filter(|mirrors| !mirrors.is_empty())
            .ok_or_else(|| Error::UnknownScheme {
                scheme: spec.scheme.clone(),
            })?;
        let git = mirrors
            .iter()
            .map(|base| join_candidate(&spec.scheme, base, &spec.path))
            .collect();
        Ok(ResolvedSource {
            git,
            version: spec.range,
        })
    }
}

/// Join one mirror base with the repository path.
///
/// Network mirrors get `<base>/<path>.git`; `file` mirrors resolve to the
/// `.git` directory under a local base directory.
fn join_candidate(scheme: &str, base: &str, path: &str) -> String {
    if scheme == FILE_SCHEME {
        Path::new(base)
            .join(path)
            .join(".git")
            .to_string_lossy()
            .into_owned()
    } else {
        format!("{}/{}.git", base.trim_end_matches('/'), path)
    }
}
