//! Peer range validation.
//!
//! Classifies one declared peer dependency of one consumer into a
//! [`PeerCheckResult`].

use std::fmt;
use std::path::{Path, PathBuf};

use deno_semver::{RangeBound, Version, VersionBoundKind, VersionRange, VersionRangeSet, VersionReq};
use serde::Serialize;
use tracing::debug;

use crate::store::{PackageRecord, RunContext, StoreSys};

use super::resolver::resolve_peer_from;

/// Specifier prefixes that point somewhere other than the registry.
const NON_REGISTRY_PROTOCOLS: &[&str] = &[
    "workspace",
    "link",
    "file",
    "portal",
    "patch",
    "catalog",
    "npm",
    "jsr",
    "git",
    "git+ssh",
    "git+https",
    "git+http",
    "git+file",
    "github",
    "gitlab",
    "bitbucket",
    "http",
    "https",
];

/// Outcome status of a peer check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeerStatus {
    Satisfied,
    Missing,
    Mismatched,
    InvalidRange,
    InvalidVersion,
}

impl PeerStatus {
    /// Stable lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Satisfied => "satisfied",
            Self::Missing => "missing",
            Self::Mismatched => "mismatched",
            Self::InvalidRange => "invalid-range",
            Self::InvalidVersion => "invalid-version",
        }
    }

    /// Whether this status means the peer is verifiably broken.
    ///
    /// `InvalidRange` and `InvalidVersion` mean "could not verify" and never
    /// block.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Missing | Self::Mismatched)
    }
}

impl fmt::Display for PeerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of checking one declared peer of one consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerCheckResult {
    /// The nearest installed peer satisfies the range.
    Satisfied {
        peer: String,
        range: String,
        version: String,
        found_in: PathBuf,
    },
    /// No copy of the peer is reachable from the consumer.
    Missing {
        peer: String,
        range: String,
        searched_from: PathBuf,
    },
    /// The nearest installed peer is outside the range.
    Mismatched {
        peer: String,
        range: String,
        version: String,
        found_in: PathBuf,
    },
    /// The declared range cannot be checked (protocol specifier, dist-tag,
    /// or unparseable text).
    InvalidRange {
        peer: String,
        range: String,
        reason: String,
    },
    /// The installed peer's version is not valid semver.
    InvalidVersion {
        peer: String,
        range: String,
        version: String,
        found_in: PathBuf,
        reason: String,
    },
}

impl PeerCheckResult {
    /// The result's status.
    pub fn status(&self) -> PeerStatus {
        match self {
            Self::Satisfied { .. } => PeerStatus::Satisfied,
            Self::Missing { .. } => PeerStatus::Missing,
            Self::Mismatched { .. } => PeerStatus::Mismatched,
            Self::InvalidRange { .. } => PeerStatus::InvalidRange,
            Self::InvalidVersion { .. } => PeerStatus::InvalidVersion,
        }
    }

    /// The peer name.
    pub fn peer(&self) -> &str {
        match self {
            Self::Satisfied { peer, .. }
            | Self::Missing { peer, .. }
            | Self::Mismatched { peer, .. }
            | Self::InvalidRange { peer, .. }
            | Self::InvalidVersion { peer, .. } => peer,
        }
    }

    /// The declared range.
    pub fn range(&self) -> &str {
        match self {
            Self::Satisfied { range, .. }
            | Self::Missing { range, .. }
            | Self::Mismatched { range, .. }
            | Self::InvalidRange { range, .. }
            | Self::InvalidVersion { range, .. } => range,
        }
    }

    /// The installed version, when a peer was found.
    pub fn installed_version(&self) -> Option<&str> {
        match self {
            Self::Satisfied { version, .. }
            | Self::Mismatched { version, .. }
            | Self::InvalidVersion { version, .. } => Some(version),
            Self::Missing { .. } | Self::InvalidRange { .. } => None,
        }
    }

    /// Whether this result blocks a strict run.
    pub fn is_blocking(&self) -> bool {
        self.status().is_blocking()
    }
}

/// Parse a declared peer range as an npm range.
///
/// Returns a human-readable reason when the range cannot be checked against
/// an installed version.
pub fn parse_declared_range(range: &str) -> Result<VersionReq, String> {
    let trimmed = range.trim();
    if let Some(reason) = non_registry_reason(trimmed) {
        return Err(reason);
    }

    // npm treats an empty range as "any version".
    let text = if trimmed.is_empty() { "*" } else { trimmed };
    let req = VersionReq::parse_from_npm(text).map_err(|e| e.to_string())?;
    if let Some(tag) = req.tag() {
        return Err(format!(
            "dist-tag '{}' cannot be compared with an installed version",
            tag
        ));
    }
    Ok(req)
}

fn non_registry_reason(range: &str) -> Option<String> {
    if let Some((scheme, _)) = range.split_once(':') {
        if NON_REGISTRY_PROTOCOLS.contains(&scheme.to_ascii_lowercase().as_str()) {
            return Some(format!("'{}:' specifier is not a registry range", scheme));
        }
    }
    if range.starts_with("./")
        || range.starts_with("../")
        || range.starts_with("~/")
        || range.starts_with('/')
    {
        return Some("local path is not a registry range".to_string());
    }
    None
}

/// Whether `version` lies in any range of the set.
///
/// Pre-release versions are ordinary points on the version line here, so
/// `18.3.0-canary.4` satisfies `^18.2.0`.
fn range_set_contains(ranges: &VersionRangeSet, version: &Version) -> bool {
    ranges.0.iter().any(|range| range_contains(range, version))
}

fn range_contains(range: &VersionRange, version: &Version) -> bool {
    if !range.intersects_version(version) {
        return false;
    }
    // Caret, tilde and x-range upper bounds also exclude the pre-releases of
    // the bound itself: `^18` stops before `19.0.0-rc.1`.
    match &range.end {
        RangeBound::Version(end)
            if end.kind == VersionBoundKind::Exclusive
                && end.version.pre.is_empty()
                && !version.pre.is_empty() =>
        {
            (version.major, version.minor, version.patch)
                != (end.version.major, end.version.minor, end.version.patch)
        }
        _ => true,
    }
}

/// Check one declared peer of `consumer`.
///
/// The range is parsed first; an unparseable range is reported without
/// touching the filesystem. The peer is then resolved nearest-first from the
/// consumer's directory up to `project_root`, and its version compared with
/// pre-releases included.
pub fn validate_peer<TSys: StoreSys>(
    ctx: &RunContext<TSys>,
    consumer: &PackageRecord,
    peer_name: &str,
    declared_range: &str,
    project_root: &Path,
) -> PeerCheckResult {
    let peer = peer_name.to_string();
    let range = declared_range.to_string();

    let req = match parse_declared_range(declared_range) {
        Ok(req) => req,
        Err(reason) => {
            debug!(
                "{}: cannot check peer {}@{}: {}",
                consumer.name(),
                peer_name,
                declared_range,
                reason
            );
            return PeerCheckResult::InvalidRange {
                peer,
                range,
                reason,
            };
        }
    };

    let Some(resolved) = resolve_peer_from(ctx, &consumer.directory, peer_name, project_root)
    else {
        return PeerCheckResult::Missing {
            peer,
            range,
            searched_from: consumer.directory.clone(),
        };
    };

    let version_text = resolved.manifest.version.clone();
    let version = match Version::parse_from_npm(version_text.trim()) {
        Ok(version) => version,
        Err(e) => {
            return PeerCheckResult::InvalidVersion {
                peer,
                range,
                version: version_text,
                found_in: resolved.found_in,
                reason: e.to_string(),
            };
        }
    };

    if req
        .range()
        .is_some_and(|ranges| range_set_contains(ranges, &version))
    {
        PeerCheckResult::Satisfied {
            peer,
            range,
            version: version_text,
            found_in: resolved.found_in,
        }
    } else {
        PeerCheckResult::Mismatched {
            peer,
            range,
            version: version_text,
            found_in: resolved.found_in,
        }
    }
}
