//! Package manifest (`package.json`) reading.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use sys_traits::FsRead;
use tracing::trace;

/// The subset of `package.json` needed to check peer dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageManifest {
    /// Package name, never empty.
    pub name: String,
    /// Installed version, as written in the manifest.
    pub version: String,
    /// Declared peer dependencies: peer name to version range.
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parse manifest JSON.
    ///
    /// Returns `None` when the text is not a JSON object or lacks a
    /// non-empty `name` or a `version`. Individual `peerDependencies`
    /// entries with non-string ranges are dropped.
    pub fn parse(text: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(text).ok()?;
        let object = value.as_object()?;

        let name = object.get("name")?.as_str()?.trim();
        if name.is_empty() {
            return None;
        }
        let version = object.get("version")?.as_str()?;

        let peer_dependencies = object
            .get("peerDependencies")
            .and_then(Value::as_object)
            .map(|peers| {
                peers
                    .iter()
                    .filter_map(|(peer, range)| Some((peer.clone(), range.as_str()?.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            name: name.to_string(),
            version: version.to_string(),
            peer_dependencies,
        })
    }

    /// Whether the package declares any peer dependencies.
    pub fn has_peers(&self) -> bool {
        !self.peer_dependencies.is_empty()
    }
}

/// Reads manifests through a filesystem, caching by path.
///
/// Unreadable manifests are cached too, so a path reached through several
/// walk routes is read at most once per run.
pub struct ManifestReader<TSys> {
    sys: TSys,
    cache: RefCell<HashMap<PathBuf, Option<Rc<PackageManifest>>>>,
}

impl<TSys: FsRead> ManifestReader<TSys> {
    /// Create a reader over the given filesystem.
    pub fn new(sys: TSys) -> Self {
        Self {
            sys,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The filesystem this reader reads from.
    pub fn sys(&self) -> &TSys {
        &self.sys
    }

    /// Read the manifest at `path`, or `None` if absent or malformed.
    pub fn read(&self, path: &Path) -> Option<Rc<PackageManifest>> {
        if let Some(cached) = self.cache.borrow().get(path) {
            return cached.clone();
        }

        let manifest = match self.sys.fs_read_to_string(path) {
            Ok(text) => {
                let parsed = PackageManifest::parse(&text).map(Rc::new);
                if parsed.is_none() {
                    trace!("Ignoring malformed manifest {}", path.display());
                }
                parsed
            }
            Err(_) => None,
        };

        self.cache
            .borrow_mut()
            .insert(path.to_path_buf(), manifest.clone());
        manifest
    }

    /// Number of paths read so far (hits and misses).
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}
