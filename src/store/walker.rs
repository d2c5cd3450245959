//! Package tree walking.
//!
//! Discovers every installed package under a store root, including scoped
//! packages, packages reached through symlinks (as content-addressed stores
//! lay them out), and non-hoisted packages nested in a package's own
//! `node_modules`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, trace};

use super::fs::{read_dir_names, StoreSys};
use super::manifest::PackageManifest;
use super::{RunContext, STORE_DIR};

/// An installed package and the real directory it lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRecord {
    /// The package's manifest.
    pub manifest: Rc<PackageManifest>,
    /// Canonical (symlink-free) package directory.
    pub directory: PathBuf,
}

impl PackageRecord {
    /// The package name.
    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// The installed version.
    pub fn version(&self) -> &str {
        &self.manifest.version
    }
}

/// How the walker treats a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A scope folder (`@scope`) holding packages one level deeper.
    Scope,
    /// A directory that is a package if it has a readable manifest.
    PackageCandidate,
    /// Hidden entries such as `.bin`, `.pnpm` and `.cache`.
    Ignored,
}

/// Classify a store entry by its name.
pub fn classify_entry(name: &str) -> EntryKind {
    if name.starts_with('.') {
        EntryKind::Ignored
    } else if name.starts_with('@') {
        EntryKind::Scope
    } else {
        EntryKind::PackageCandidate
    }
}

/// Collect every physically distinct package under `root`.
///
/// Directories are compared by real path, so a package reachable through
/// several symlinks is recorded once and symlink cycles terminate.
/// Unreadable or vanished directories are skipped. Siblings are visited in
/// name order, so the result is stable for an unchanged tree.
pub fn collect_packages<TSys: StoreSys>(
    ctx: &RunContext<TSys>,
    root: &Path,
) -> Vec<PackageRecord> {
    let mut walker = TreeWalker {
        ctx,
        visited: HashSet::new(),
        records: Vec::new(),
    };
    walker.walk_store(root);
    debug!(
        "Collected {} packages from {} ({} directories visited)",
        walker.records.len(),
        root.display(),
        walker.visited.len()
    );
    walker.records
}

struct TreeWalker<'a, TSys> {
    ctx: &'a RunContext<TSys>,
    visited: HashSet<PathBuf>,
    records: Vec<PackageRecord>,
}

impl<TSys: StoreSys> TreeWalker<'_, TSys> {
    /// Walk a directory of packages (a store root, a nested store, or a
    /// scope folder).
    fn walk_store(&mut self, dir: &Path) {
        let Some(real) = self.enter(dir) else {
            return;
        };

        let names = match read_dir_names(self.ctx.sys(), &real) {
            Ok(names) => names,
            Err(e) => {
                debug!("Skipping unreadable directory {}: {}", real.display(), e);
                return;
            }
        };

        for name in names {
            let path = real.join(&name);
            match classify_entry(&name) {
                EntryKind::Ignored => trace!("Ignoring {}", path.display()),
                EntryKind::Scope => self.walk_store(&path),
                EntryKind::PackageCandidate => self.visit_package(&path),
            }
        }
    }

    fn visit_package(&mut self, dir: &Path) {
        let Ok(real) = self.ctx.sys().fs_canonicalize(dir) else {
            trace!("Skipping unresolvable entry {}", dir.display());
            return;
        };
        if self.visited.contains(&real) {
            trace!("Already visited {}", real.display());
            return;
        }

        let Some(manifest) = self.ctx.read_package(&real) else {
            return;
        };
        self.visited.insert(real.clone());

        let nested = real.join(STORE_DIR);
        self.records.push(PackageRecord {
            manifest,
            directory: real,
        });

        if self.ctx.sys().fs_is_dir_no_err(&nested) {
            self.walk_store(&nested);
        }
    }

    /// Canonicalize `dir` and mark it visited. `None` if it cannot be
    /// resolved or was already walked.
    fn enter(&mut self, dir: &Path) -> Option<PathBuf> {
        let real = match self.ctx.sys().fs_canonicalize(dir) {
            Ok(real) => real,
            Err(e) => {
                trace!("Skipping {}: {}", dir.display(), e);
                return None;
            }
        };
        if !self.visited.insert(real.clone()) {
            trace!("Already visited {}", real.display());
            return None;
        }
        Some(real)
    }
}
