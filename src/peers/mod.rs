//! Peer dependency resolution and validation.
//!
//! - [`resolver`] - nearest-first lookup of an installed peer
//! - [`validator`] - classification of a declared range against the
//!   resolved peer
//! - [`check_peers`] - the full run over a dependency store

pub mod resolver;
pub mod validator;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::detection::PackageManager;
use crate::error::{PeercheckError, Result};
use crate::report::Report;
use crate::store::{collect_packages, RunContext, StoreSys};

pub use resolver::{peer_package_dir, resolve_peer_from, search_levels, ResolvedPeer};
pub use validator::{parse_declared_range, validate_peer, PeerCheckResult, PeerStatus};

/// Which consumers and peers a run looks at.
#[derive(Debug, Clone, Default)]
pub struct CheckScope {
    /// Only check these consumer packages (all when empty).
    pub packages: Vec<String>,
    /// Never check these peers.
    pub ignore: Vec<String>,
}

impl CheckScope {
    fn includes_package(&self, name: &str) -> bool {
        self.packages.is_empty() || self.packages.iter().any(|p| p == name)
    }

    fn ignores_peer(&self, peer: &str) -> bool {
        self.ignore.iter().any(|p| p == peer)
    }
}

/// Check every declared peer of every package under `store_root`.
///
/// The project root used as the resolution boundary is the store's parent
/// directory. Remediation hints in the report use `package_manager`.
///
/// # Errors
///
/// Returns [`PeercheckError::StoreNotFound`] if `store_root` is not a
/// directory.
pub fn check_peers<TSys: StoreSys>(
    ctx: &RunContext<TSys>,
    store_root: &Path,
    scope: &CheckScope,
    package_manager: PackageManager,
) -> Result<Report> {
    if !ctx.sys().fs_is_dir_no_err(store_root) {
        return Err(PeercheckError::StoreNotFound {
            path: store_root.to_path_buf(),
        });
    }
    let store_root = ctx.sys().fs_canonicalize(store_root)?;
    let project_root = store_root
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| store_root.clone());

    let mut report = Report::new(&store_root, &project_root, package_manager);
    let packages = collect_packages(ctx, &store_root);
    info!(
        "Checking peer dependencies of {} packages under {}",
        packages.len(),
        store_root.display()
    );

    for record in packages.iter().filter(|r| r.manifest.has_peers()) {
        if !scope.includes_package(record.name()) {
            continue;
        }
        debug!("Checking peer deps for {}@{}", record.name(), record.version());

        for (peer, range) in &record.manifest.peer_dependencies {
            if scope.ignores_peer(peer) {
                debug!("Ignoring peer {} of {}", peer, record.name());
                continue;
            }
            let result = validate_peer(ctx, record, peer, range, &project_root);
            report.record(record, &result);
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fs::test_support::MemoryTree;
    use sys_traits::impls::InMemorySys;

    fn fixture() -> InMemorySys {
        InMemorySys::default()
            .with_file(
                "/app/node_modules/lib/package.json",
                r#"{"name":"lib","version":"1.0.0","peerDependencies":{"react":"^18","react-dom":"^18"}}"#,
            )
            .with_file(
                "/app/node_modules/other/package.json",
                r#"{"name":"other","version":"1.0.0","peerDependencies":{"react":"^17"}}"#,
            )
            .with_file(
                "/app/node_modules/react/package.json",
                r#"{"name":"react","version":"18.2.0"}"#,
            )
    }

    fn run(scope: &CheckScope) -> Report {
        let ctx = RunContext::new(fixture());
        check_peers(
            &ctx,
            Path::new("/app/node_modules"),
            scope,
            PackageManager::Pnpm,
        )
        .unwrap()
    }

    #[test]
    fn checks_every_declared_peer() {
        let report = run(&CheckScope::default());
        assert_eq!(report.store_root, Path::new("/app/node_modules"));
        assert_eq!(report.project_root, Path::new("/app"));
        assert_eq!(report.summary.satisfied, 1);
        assert_eq!(report.summary.missing, 1);
        assert_eq!(report.summary.mismatched, 1);
        assert_eq!(report.issues.len(), 2);
    }

    #[test]
    fn package_filter_limits_consumers() {
        let scope = CheckScope {
            packages: vec!["other".into()],
            ignore: vec![],
        };
        let report = run(&scope);
        assert_eq!(report.summary.total(), 1);
        assert_eq!(report.summary.mismatched, 1);
        assert!(!report.packages.contains_key("lib"));
    }

    #[test]
    fn ignored_peers_are_skipped() {
        let scope = CheckScope {
            packages: vec![],
            ignore: vec!["react-dom".into()],
        };
        let report = run(&scope);
        assert_eq!(report.summary.missing, 0);
    }

    #[test]
    fn missing_store_is_fatal() {
        let ctx = RunContext::new(InMemorySys::default());
        let err = check_peers(
            &ctx,
            Path::new("/app/node_modules"),
            &CheckScope::default(),
            PackageManager::Npm,
        )
        .unwrap_err();
        assert!(matches!(err, PeercheckError::StoreNotFound { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
