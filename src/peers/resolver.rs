//! Node-style upward peer resolution.
//!
//! A peer is resolved the way a module loader would find it at runtime:
//! look in `<dir>/node_modules/<peer>` starting at the consumer's own
//! directory, then in each parent, stopping at the project root. The first
//! readable copy wins.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::trace;

use crate::store::{PackageManifest, RunContext, StoreSys, STORE_DIR};

/// A peer located on the consumer's search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeer {
    /// The peer's manifest.
    pub manifest: Rc<PackageManifest>,
    /// The search level whose `node_modules` held the peer.
    pub found_in: PathBuf,
    /// The peer's own package directory.
    pub package_dir: PathBuf,
}

/// Iterator over the directories searched for a peer, from the consumer
/// directory up to and including the stop directory.
///
/// If `start` is not beneath `stop`, iteration ends at the filesystem root.
#[derive(Debug, Clone)]
pub struct SearchLevels<'a> {
    next: Option<&'a Path>,
    stop: &'a Path,
}

impl<'a> Iterator for SearchLevels<'a> {
    type Item = &'a Path;

    fn next(&mut self) -> Option<&'a Path> {
        let current = self.next.take()?;
        if current != self.stop {
            self.next = current.parent();
        }
        Some(current)
    }
}

/// Directories searched when resolving from `start`, nearest first.
pub fn search_levels<'a>(start: &'a Path, stop: &'a Path) -> SearchLevels<'a> {
    SearchLevels {
        next: Some(start),
        stop,
    }
}

/// Where a peer would live if installed directly under `level`.
///
/// Scoped names (`@scope/name`) span two path segments.
pub fn peer_package_dir(level: &Path, peer_name: &str) -> PathBuf {
    let mut dir = level.join(STORE_DIR);
    for segment in peer_name.split('/') {
        dir.push(segment);
    }
    dir
}

/// Resolve `peer_name` as seen from `consumer_dir`, never searching above
/// `stop_dir`.
pub fn resolve_peer_from<TSys: StoreSys>(
    ctx: &RunContext<TSys>,
    consumer_dir: &Path,
    peer_name: &str,
    stop_dir: &Path,
) -> Option<ResolvedPeer> {
    for level in search_levels(consumer_dir, stop_dir) {
        // Node never looks in node_modules/node_modules.
        if level.file_name().is_some_and(|name| name == STORE_DIR) {
            continue;
        }

        let package_dir = peer_package_dir(level, peer_name);
        if let Some(manifest) = ctx.read_package(&package_dir) {
            trace!(
                "Resolved {} from {} in {}",
                peer_name,
                consumer_dir.display(),
                level.display()
            );
            return Some(ResolvedPeer {
                manifest,
                found_in: level.to_path_buf(),
                package_dir,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fs::test_support::MemoryTree;
    use sys_traits::impls::InMemorySys;

    fn manifest(name: &str, version: &str) -> String {
        format!(r#"{{"name":"{}","version":"{}"}}"#, name, version)
    }

    #[test]
    fn search_levels_stop_inclusive() {
        let levels: Vec<_> = search_levels(
            Path::new("/app/node_modules/a/node_modules/b"),
            Path::new("/app"),
        )
        .collect();
        assert_eq!(
            levels,
            vec![
                Path::new("/app/node_modules/a/node_modules/b"),
                Path::new("/app/node_modules/a/node_modules"),
                Path::new("/app/node_modules/a"),
                Path::new("/app/node_modules"),
                Path::new("/app"),
            ]
        );
    }

    #[test]
    fn search_levels_start_equals_stop() {
        let levels: Vec<_> = search_levels(Path::new("/app"), Path::new("/app")).collect();
        assert_eq!(levels, vec![Path::new("/app")]);
    }

    #[test]
    fn search_levels_outside_stop_end_at_root() {
        let levels: Vec<_> = search_levels(Path::new("/store/x"), Path::new("/app")).collect();
        assert_eq!(levels.last().copied(), Some(Path::new("/")));
        assert_eq!(levels.len(), 3);
    }

    #[test]
    fn peer_package_dir_handles_scopes() {
        assert_eq!(
            peer_package_dir(Path::new("/app"), "@types/react"),
            Path::new("/app/node_modules/@types/react")
        );
        assert_eq!(
            peer_package_dir(Path::new("/app"), "react"),
            Path::new("/app/node_modules/react")
        );
    }

    #[test]
    fn resolves_from_project_root() {
        let sys = InMemorySys::default()
            .with_file("/app/node_modules/a/package.json", manifest("a", "1.0.0"))
            .with_file("/app/node_modules/b/package.json", manifest("b", "2.3.1"));
        let ctx = RunContext::new(sys);

        let resolved = resolve_peer_from(
            &ctx,
            Path::new("/app/node_modules/a"),
            "b",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(resolved.manifest.version, "2.3.1");
        assert_eq!(resolved.found_in, Path::new("/app"));
        assert_eq!(resolved.package_dir, Path::new("/app/node_modules/b"));
    }

    #[test]
    fn nearest_copy_wins() {
        let sys = InMemorySys::default()
            .with_file("/app/node_modules/x/package.json", manifest("x", "1.0.0"))
            .with_file("/app/node_modules/a/package.json", manifest("a", "1.0.0"))
            .with_file(
                "/app/node_modules/a/node_modules/x/package.json",
                manifest("x", "2.0.0"),
            );
        let ctx = RunContext::new(sys);

        let resolved = resolve_peer_from(
            &ctx,
            Path::new("/app/node_modules/a"),
            "x",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(resolved.manifest.version, "2.0.0");
        assert_eq!(resolved.found_in, Path::new("/app/node_modules/a"));
    }

    #[test]
    fn never_searches_above_stop_dir() {
        let sys = InMemorySys::default()
            .with_file("/node_modules/x/package.json", manifest("x", "1.0.0"))
            .with_file("/app/node_modules/a/package.json", manifest("a", "1.0.0"));
        let ctx = RunContext::new(sys);

        let resolved = resolve_peer_from(
            &ctx,
            Path::new("/app/node_modules/a"),
            "x",
            Path::new("/app"),
        );
        assert!(resolved.is_none());
    }

    #[test]
    fn resolves_scoped_peer() {
        let sys = InMemorySys::default()
            .with_file("/app/node_modules/a/package.json", manifest("a", "1.0.0"))
            .with_file(
                "/app/node_modules/@emotion/react/package.json",
                manifest("@emotion/react", "11.11.0"),
            );
        let ctx = RunContext::new(sys);

        let resolved = resolve_peer_from(
            &ctx,
            Path::new("/app/node_modules/a"),
            "@emotion/react",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(resolved.manifest.name, "@emotion/react");
    }

    #[test]
    fn unreadable_copy_is_passed_over() {
        let sys = InMemorySys::default()
            .with_file("/app/node_modules/a/package.json", manifest("a", "1.0.0"))
            .with_file("/app/node_modules/a/node_modules/x/package.json", "garbage")
            .with_file("/app/node_modules/x/package.json", manifest("x", "1.5.0"));
        let ctx = RunContext::new(sys);

        let resolved = resolve_peer_from(
            &ctx,
            Path::new("/app/node_modules/a"),
            "x",
            Path::new("/app"),
        )
        .unwrap();
        assert_eq!(resolved.manifest.version, "1.5.0");
    }
}
