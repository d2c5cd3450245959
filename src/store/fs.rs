//! Filesystem access for the package store.
//!
//! The walker, resolver and manifest reader only ever read from disk. They
//! are generic over [`StoreSys`], so a run can be pointed at the real
//! filesystem (`sys_traits::impls::RealSys`) or at an in-memory tree
//! (`sys_traits::impls::InMemorySys`).

use std::io;
use std::path::Path;

use sys_traits::{FsCanonicalize, FsDirEntry, FsMetadata, FsRead, FsReadDir};
use tracing::trace;

/// Read-only filesystem capabilities used by the package store.
pub trait StoreSys: FsCanonicalize + FsMetadata + FsRead + FsReadDir {}

impl<T: FsCanonicalize + FsMetadata + FsRead + FsReadDir> StoreSys for T {}

/// List the entry names of a directory, sorted.
///
/// Fails only when the directory itself cannot be listed. A single entry
/// that cannot be read, or whose name is not UTF-8, is skipped.
pub fn read_dir_names(sys: &impl FsReadDir, path: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in sys.fs_read_dir(path)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                trace!("Skipping unreadable entry in {}: {}", path.display(), e);
                continue;
            }
        };
        // Package names are always valid UTF-8.
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}


#[cfg(test)]
mod tests {
    use super::test_support::MemoryTree;
    use super::*;
    use sys_traits::impls::{InMemorySys, RealSys};
    use tempfile::TempDir;

    #[test]
    fn memory_tree_lists_children_sorted() {
        let sys = InMemorySys::default()
            .with_dir("/store/zeta")
            .with_dir("/store/alpha")
            .with_file("/store/alpha/package.json", "{}");

        let names = read_dir_names(&sys, Path::new("/store")).unwrap();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn memory_tree_file_is_not_dir() {
        let sys = InMemorySys::default().with_file("/x/package.json", "{}");
        assert!(sys.fs_is_dir_no_err("/x"));
        assert!(!sys.fs_is_dir_no_err("/x/package.json"));
        assert!(read_dir_names(&sys, Path::new("/missing")).is_err());
    }

    #[test]
    fn real_fs_lists_sorted_names() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("b")).unwrap();
        std::fs::create_dir(temp.path().join("a")).unwrap();
        std::fs::write(temp.path().join("c.txt"), "").unwrap();

        let names = read_dir_names(&RealSys, temp.path()).unwrap();
        assert_eq!(names, vec!["a", "b", "c.txt"]);
    }

    #[test]
    fn real_fs_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        assert!(read_dir_names(&RealSys, &temp.path().join("nope")).is_err());
        assert!(!RealSys.fs_is_dir_no_err(temp.path().join("nope")));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_does_not_hide_siblings() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("a")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("b")).unwrap();
        std::fs::create_dir(temp.path().join("c")).unwrap();

        let names = read_dir_names(&RealSys, temp.path()).unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
