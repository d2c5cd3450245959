//! Installed package store access.
//!
//! This module reads an installed dependency tree (`node_modules`):
//!
//! - [`fs`] - the read-only filesystem capabilities ([`StoreSys`])
//! - [`manifest`] - `package.json` parsing and the per-run manifest cache
//! - [`walker`] - discovery of every physically distinct package directory
//!
//! All mutable state for one run lives in a [`RunContext`].
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use peercheck::store::{collect_packages, RunContext};
//! use sys_traits::impls::InMemorySys;
//! use sys_traits::{FsCreateDirAll, FsWrite};
//!
//! let sys = InMemorySys::default();
//! sys.fs_create_dir_all("/app/node_modules/react").unwrap();
//! sys.fs_write(
//!     "/app/node_modules/react/package.json",
//!     r#"{"name":"react","version":"18.2.0"}"#,
//! )
//! .unwrap();
//! let ctx = RunContext::new(sys);
//!
//! let packages = collect_packages(&ctx, Path::new("/app/node_modules"));
//! assert_eq!(packages.len(), 1);
//! assert_eq!(packages[0].manifest.name, "react");
//! ```

pub mod fs;
pub mod manifest;
pub mod walker;

use std::path::Path;
use std::rc::Rc;

use sys_traits::impls::RealSys;

pub use fs::{read_dir_names, StoreSys};
pub use manifest::{ManifestReader, PackageManifest};
pub use walker::{classify_entry, collect_packages, EntryKind, PackageRecord};

/// Name of the dependency directory inside a project or package.
pub const STORE_DIR: &str = "node_modules";

/// Name of the package manifest file.
pub const MANIFEST_FILE: &str = "package.json";

/// State shared by every component during a single check run.
///
/// Holds the filesystem and the manifest cache. Nothing here outlives
/// the run, and nothing is shared across threads.
pub struct RunContext<TSys = RealSys> {
    manifests: ManifestReader<TSys>,
}

impl RunContext<RealSys> {
    /// Create a context over the real filesystem.
    pub fn real() -> Self {
        Self::new(RealSys)
    }
}

impl<TSys: StoreSys> RunContext<TSys> {
    /// Create a context over the given filesystem.
    pub fn new(sys: TSys) -> Self {
        Self {
            manifests: ManifestReader::new(sys),
        }
    }

    /// The filesystem for this run.
    pub fn sys(&self) -> &TSys {
        self.manifests.sys()
    }

    /// Read a manifest through the run's cache.
    pub fn read_manifest(&self, path: &Path) -> Option<Rc<PackageManifest>> {
        self.manifests.read(path)
    }

    /// Read the manifest of the package in `dir`.
    pub fn read_package(&self, dir: &Path) -> Option<Rc<PackageManifest>> {
        self.read_manifest(&dir.join(MANIFEST_FILE))
    }

    /// Number of manifest paths read during this run.
    pub fn manifests_read(&self) -> usize {
        self.manifests.cached_len()
    }
}
