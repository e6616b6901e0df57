//! Semver matching of repository tags.

use semver::{Version, VersionReq};

use crate::error::{Error, Result};

/// Select the best tag satisfying a semver range.
///
/// Tags are normalized by stripping one optional leading `v`; tags that
/// still fail to parse as a semantic version are skipped. Among satisfying
/// tags the maximum version wins under standard precedence; ties after
/// normalization (e.g. `1.0.0` vs `v1.0.0`) keep the first-encountered tag
/// in input order.
///
/// `Ok(None)` means no tag satisfies the range; the caller decides
/// whether that is fatal. The range itself must parse: it is the one input
/// validated here.
pub fn match_tag<'a>(tags: &'a [String], range: &str) -> Result<Option<&'a str>> {
    let req = parse_range(range)?;
    let mut best: Option<(Version, &str)> = None;
    for tag in tags {
        let Ok(version) = Version::parse(tag.strip_prefix('v').unwrap_or(tag)) else {
            continue;
        };
        if !req.matches(&version) {
            continue;
        }
        match best {
            Some((ref max, _)) if version <= *max => {}
            _ => best = Some((version, tag)),
        }
    }
    Ok(best.map(|(_, tag)| tag))
}

/// Parse a range string, treating a bare `X.Y.Z` as exact equality.
///
/// The `semver` crate reads a bare version as caret-compatible; package
/// specifiers pin it exactly, so it is rewritten to `=X.Y.Z` first.
fn parse_range(range: &str) -> Result<VersionReq> {
    let trimmed = range.trim();
    let normalized = if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("={trimmed}")
    } else {
        trimmed.to_string()
    };
    VersionReq::parse(&normalized).map_err(|err| Error::InvalidRange {
        range: range.to_string(),
        detail: err.to_string(),
    })
}
