//! peercheck - Peer dependency verification for installed Node packages.
//!
//! peercheck walks an installed dependency store (`node_modules`), resolves
//! every declared peer dependency the way Node resolves modules, and reports
//! which peers are satisfied, missing, or installed at a version outside the
//! declared range.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and settings resolution
//! - [`detection`] - Package manager detection
//! - [`error`] - Error types and result aliases
//! - [`peers`] - Peer resolution and range validation
//! - [`report`] - Result aggregation, formatting, and exit policy
//! - [`store`] - Package store walking and manifest reading
//! - [`ui`] - Spinners, themes, and terminal output
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use peercheck::detection::PackageManager;
//! use peercheck::peers::{check_peers, CheckScope};
//! use peercheck::store::RunContext;
//! use sys_traits::impls::InMemorySys;
//! use sys_traits::{FsCreateDirAll, FsWrite};
//!
//! let sys = InMemorySys::default();
//! for (name, manifest) in [
//!     ("lib", r#"{"name":"lib","version":"1.0.0","peerDependencies":{"react":"^18"}}"#),
//!     ("react", r#"{"name":"react","version":"17.0.2"}"#),
//! ] {
//!     let dir = Path::new("/app/node_modules").join(name);
//!     sys.fs_create_dir_all(&dir).unwrap();
//!     sys.fs_write(dir.join("package.json"), manifest).unwrap();
//! }
//! let ctx = RunContext::new(sys);
//!
//! let report = check_peers(
//!     &ctx,
//!     Path::new("/app/node_modules"),
//!     &CheckScope::default(),
//!     PackageManager::Pnpm,
//! )
//! .unwrap();
//! assert_eq!(report.summary.mismatched, 1);
//! assert!(report.exit_status(true).exit_code() == 1);
//! ```

pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod peers;
pub mod report;
pub mod store;
pub mod ui;

pub use error::{PeercheckError, Result};
