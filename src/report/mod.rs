//! Peer check reporting.
//!
//! A [`Report`] aggregates check results into a global [`Summary`], one
//! summary per consumer package, and an [`Issue`] for every result that is
//! not satisfied. Formatters render it for humans ([`HumanFormatter`]) or
//! machines ([`JsonFormatter`]), and [`Report::exit_status`] applies the
//! exit policy.
//!
//! # Example
//!
//! ```
//! use peercheck::detection::PackageManager;
//! use peercheck::report::{ExitStatus, Report};
//!
//! let report = Report::new("/app/node_modules", "/app", PackageManager::Pnpm);
//! assert!(!report.has_blocking_issues());
//! assert_eq!(report.exit_status(true), ExitStatus::Pass);
//! ```

pub mod human;
pub mod json;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::detection::PackageManager;
use crate::peers::{PeerCheckResult, PeerStatus};
use crate::store::PackageRecord;

pub use human::HumanFormatter;
pub use json::JsonFormatter;

/// Output format for a report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Trait for rendering a report.
pub trait ReportFormatter {
    /// Format the report to the given writer.
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()>;
}

/// Counts of check results by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub satisfied: usize,
    pub mismatched: usize,
    pub missing: usize,
    pub invalid_range: usize,
    pub invalid_version: usize,
}

impl Summary {
    /// Count one result.
    pub fn record(&mut self, status: PeerStatus) {
        match status {
            PeerStatus::Satisfied => self.satisfied += 1,
            PeerStatus::Mismatched => self.mismatched += 1,
            PeerStatus::Missing => self.missing += 1,
            PeerStatus::InvalidRange => self.invalid_range += 1,
            PeerStatus::InvalidVersion => self.invalid_version += 1,
        }
    }

    /// Number of results counted.
    pub fn total(&self) -> usize {
        self.satisfied + self.mismatched + self.missing + self.invalid_range + self.invalid_version
    }

    /// Number of missing or mismatched peers.
    pub fn blocking(&self) -> usize {
        self.missing + self.mismatched
    }
}

/// A reportable, self-contained record of a result that is not satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub status: PeerStatus,
    pub package: String,
    pub package_version: String,
    pub package_dir: PathBuf,
    pub peer: String,
    pub range: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installed_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_from: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_from: Option<PathBuf>,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Issue {
    /// Whether this issue fails a strict run.
    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }
}

/// A satisfied peer, kept for verbose output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SatisfiedPeer {
    pub package: String,
    pub peer: String,
    pub version: String,
    pub range: String,
    pub resolved_from: PathBuf,
}

/// Outcome of a run under the exit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Pass,
    Fail,
}

impl ExitStatus {
    /// Process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Pass => 0,
            Self::Fail => 1,
        }
    }
}

/// Aggregated results of one check run.
#[derive(Debug, Clone)]
pub struct Report {
    /// The walked dependency store.
    pub store_root: PathBuf,
    /// The resolution boundary.
    pub project_root: PathBuf,
    /// Counts across every consumer.
    pub summary: Summary,
    /// Counts per consumer package name.
    pub packages: BTreeMap<String, Summary>,
    /// Every result that is not satisfied, in check order.
    pub issues: Vec<Issue>,
    /// Every satisfied result, in check order.
    pub satisfied: Vec<SatisfiedPeer>,
    package_manager: PackageManager,
}

impl Report {
    /// Create an empty report.
    pub fn new(
        store_root: impl AsRef<Path>,
        project_root: impl AsRef<Path>,
        package_manager: PackageManager,
    ) -> Self {
        Self {
            store_root: store_root.as_ref().to_path_buf(),
            project_root: project_root.as_ref().to_path_buf(),
            summary: Summary::default(),
            packages: BTreeMap::new(),
            issues: Vec::new(),
            satisfied: Vec::new(),
            package_manager,
        }
    }

    /// The package manager used for remediation hints.
    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    /// Record the result of checking one peer of `consumer`.
    pub fn record(&mut self, consumer: &PackageRecord, result: &PeerCheckResult) {
        let status = result.status();
        self.summary.record(status);
        self.packages
            .entry(consumer.name().to_string())
            .or_default()
            .record(status);

        let mut issue = Issue {
            status,
            package: consumer.name().to_string(),
            package_version: consumer.version().to_string(),
            package_dir: consumer.directory.clone(),
            peer: result.peer().to_string(),
            range: result.range().to_string(),
            installed_version: result.installed_version().map(str::to_string),
            resolved_from: None,
            searched_from: None,
            reason: String::new(),
            suggestion: None,
        };

        match result {
            PeerCheckResult::Satisfied {
                peer,
                range,
                version,
                found_in,
            } => {
                self.satisfied.push(SatisfiedPeer {
                    package: consumer.name().to_string(),
                    peer: peer.clone(),
                    version: version.clone(),
                    range: range.clone(),
                    resolved_from: found_in.clone(),
                });
                return;
            }
            PeerCheckResult::Missing {
                peer,
                range,
                searched_from,
            } => {
                issue.searched_from = Some(searched_from.clone());
                issue.reason = format!(
                    "no installed copy of {} is reachable from {}",
                    peer,
                    consumer.name()
                );
                issue.suggestion = Some(self.package_manager.add_command(peer, range));
            }
            PeerCheckResult::Mismatched {
                peer,
                range,
                version,
                found_in,
            } => {
                issue.resolved_from = Some(found_in.clone());
                issue.reason = format!(
                    "{}@{} is installed, but {} requires {}",
                    peer,
                    version,
                    consumer.name(),
                    range
                );
                issue.suggestion = Some(self.package_manager.add_command(peer, range));
            }
            PeerCheckResult::InvalidRange { reason, .. } => {
                issue.reason = format!("range cannot be checked: {}", reason);
            }
            PeerCheckResult::InvalidVersion {
                version,
                found_in,
                reason,
                ..
            } => {
                issue.resolved_from = Some(found_in.clone());
                issue.reason = format!("installed version '{}' is not valid: {}", version, reason);
            }
        }

        self.issues.push(issue);
    }

    /// Whether any peer is missing or mismatched.
    pub fn has_blocking_issues(&self) -> bool {
        self.issues.iter().any(Issue::is_blocking)
    }

    /// Apply the exit policy.
    ///
    /// Only missing or mismatched peers can fail a run, and only in strict
    /// mode.
    pub fn exit_status(&self, strict: bool) -> ExitStatus {
        if strict && self.has_blocking_issues() {
            ExitStatus::Fail
        } else {
            ExitStatus::Pass
        }
    }

    /// Issues grouped by consumer, preserving check order.
    pub fn issues_by_package(&self) -> Vec<(&str, Vec<&Issue>)> {
        let mut groups: Vec<(&str, Vec<&Issue>)> = Vec::new();
        for issue in &self.issues {
            match groups.last_mut() {
                Some((package, group)) if *package == issue.package => group.push(issue),
                _ => groups.push((&issue.package, vec![issue])),
            }
        }
        groups
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::rc::Rc;

    use crate::peers::PeerCheckResult;
    use crate::store::{PackageManifest, PackageRecord};

    pub fn record(name: &str, version: &str) -> PackageRecord {
        PackageRecord {
            manifest: Rc::new(PackageManifest {
                name: name.to_string(),
                version: version.to_string(),
                peer_dependencies: Default::default(),
            }),
            directory: PathBuf::from(format!("/app/node_modules/{}", name)),
        }
    }

    pub fn satisfied(peer: &str, range: &str, version: &str) -> PeerCheckResult {
        PeerCheckResult::Satisfied {
            peer: peer.into(),
            range: range.into(),
            version: version.into(),
            found_in: PathBuf::from("/app"),
        }
    }

    pub fn missing(peer: &str, range: &str, from: &str) -> PeerCheckResult {
        PeerCheckResult::Missing {
            peer: peer.into(),
            range: range.into(),
            searched_from: PathBuf::from(from),
        }
    }

    pub fn mismatched(peer: &str, range: &str, version: &str) -> PeerCheckResult {
        PeerCheckResult::Mismatched {
            peer: peer.into(),
            range: range.into(),
            version: version.into(),
            found_in: PathBuf::from("/app"),
        }
    }

    pub fn invalid_range(peer: &str, range: &str) -> PeerCheckResult {
        PeerCheckResult::InvalidRange {
            peer: peer.into(),
            range: range.into(),
            reason: "'workspace:' specifier is not a registry range".into(),
        }
    }

    pub fn invalid_version(peer: &str, range: &str, version: &str) -> PeerCheckResult {
        PeerCheckResult::InvalidVersion {
            peer: peer.into(),
            range: range.into(),
            version: version.into(),
            found_in: PathBuf::from("/app"),
            reason: "unexpected character".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    fn report() -> Report {
        Report::new("/app/node_modules", "/app", PackageManager::Pnpm)
    }

    #[test]
    fn summary_counts_each_status() {
        let mut summary = Summary::default();
        summary.record(PeerStatus::Satisfied);
        summary.record(PeerStatus::Missing);
        summary.record(PeerStatus::Missing);
        summary.record(PeerStatus::InvalidRange);

        assert_eq!(summary.satisfied, 1);
        assert_eq!(summary.missing, 2);
        assert_eq!(summary.invalid_range, 1);
        assert_eq!(summary.total(), 4);
        assert_eq!(summary.blocking(), 2);
    }

    #[test]
    fn satisfied_results_are_not_issues() {
        let mut report = report();
        report.record(&record("lib", "1.0.0"), &satisfied("react", "^18", "18.2.0"));

        assert!(report.issues.is_empty());
        assert_eq!(report.satisfied.len(), 1);
        assert_eq!(report.packages["lib"].satisfied, 1);
    }

    #[test]
    fn per_package_summaries_are_created_lazily() {
        let mut report = report();
        assert!(report.packages.is_empty());

        report.record(&record("a", "1.0.0"), &missing("x", "^1", "/app/node_modules/a"));
        report.record(&record("b", "1.0.0"), &satisfied("x", "^1", "1.0.0"));
        report.record(&record("a", "1.0.0"), &mismatched("y", "^2", "1.0.0"));

        assert_eq!(report.packages.len(), 2);
        assert_eq!(report.packages["a"].missing, 1);
        assert_eq!(report.packages["a"].mismatched, 1);
        assert_eq!(report.packages["b"].satisfied, 1);
        assert_eq!(report.summary.total(), 3);
    }

    #[test]
    fn missing_issue_carries_search_origin_and_suggestion() {
        let mut report = report();
        report.record(
            &record("lib", "2.0.0"),
            &missing("react", "^18", "/app/node_modules/lib"),
        );

        let issue = &report.issues[0];
        assert_eq!(issue.status, PeerStatus::Missing);
        assert_eq!(issue.package_version, "2.0.0");
        assert_eq!(
            issue.searched_from,
            Some(PathBuf::from("/app/node_modules/lib"))
        );
        assert_eq!(issue.suggestion.as_deref(), Some("pnpm add react@\"^18\""));
        assert!(issue.installed_version.is_none());
    }

    #[test]
    fn mismatched_issue_carries_installed_version() {
        let mut report = Report::new("/app/node_modules", "/app", PackageManager::Npm);
        report.record(&record("lib", "1.0.0"), &mismatched("react", "^18", "17.0.2"));

        let issue = &report.issues[0];
        assert_eq!(issue.installed_version.as_deref(), Some("17.0.2"));
        assert_eq!(issue.resolved_from, Some(PathBuf::from("/app")));
        assert!(issue.reason.contains("17.0.2"));
        assert_eq!(issue.suggestion.as_deref(), Some("npm install react@\"^18\""));
    }

    #[test]
    fn unverifiable_issues_have_no_suggestion() {
        let mut report = report();
        report.record(&record("c", "1.0.0"), &invalid_range("d", "workspace:*"));
        report.record(&record("c", "1.0.0"), &invalid_version("e", "^1", "banana"));

        assert_eq!(report.issues.len(), 2);
        assert!(report.issues.iter().all(|i| i.suggestion.is_none()));
        assert!(!report.has_blocking_issues());
    }

    #[test]
    fn exit_policy_passes_without_blocking_issues() {
        let mut report = report();
        report.record(&record("c", "1.0.0"), &invalid_range("d", "workspace:*"));
        report.record(&record("c", "1.0.0"), &invalid_version("e", "^1", "banana"));

        assert_eq!(report.exit_status(false), ExitStatus::Pass);
        assert_eq!(report.exit_status(true), ExitStatus::Pass);
    }

    #[test]
    fn exit_policy_fails_only_in_strict_mode() {
        let mut report = report();
        report.record(&record("lib", "1.0.0"), &mismatched("react", "^18", "17.0.2"));

        assert_eq!(report.exit_status(false), ExitStatus::Pass);
        assert_eq!(report.exit_status(true), ExitStatus::Fail);
        assert_eq!(report.exit_status(true).exit_code(), 1);
        assert_eq!(report.exit_status(false).exit_code(), 0);
    }

    #[test]
    fn issues_grouped_by_consecutive_package() {
        let mut report = report();
        report.record(&record("a", "1.0.0"), &missing("x", "^1", "/a"));
        report.record(&record("a", "1.0.0"), &missing("y", "^1", "/a"));
        report.record(&record("b", "1.0.0"), &missing("x", "^1", "/b"));

        let groups = report.issues_by_package();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "a");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "b");
    }
}
