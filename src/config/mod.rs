//! Configuration loading and resolution.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults
//! 2. Project file (`.peercheck.yml`)
//! 3. Environment (`CI`, `PEERCHECK_ROOT`)
//! 4. Command-line flags
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use peercheck::config::parse_config;
//!
//! let config = parse_config("strict: true\nignore: [react-dom]\n", Path::new(".peercheck.yml")).unwrap();
//! assert_eq!(config.strict, Some(true));
//! assert_eq!(config.ignore, vec!["react-dom".to_string()]);
//! ```

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{find_config_file, load_config_file, load_project_config, parse_config};
pub use schema::PeercheckConfig;
pub use settings::{is_truthy, CheckSettings, Environment, SettingsOverrides};
