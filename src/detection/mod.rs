//! Project detection.
//!
//! Detects which package manager a project uses so remediation hints can
//! name the right command.

pub mod package_manager;

pub use package_manager::PackageManager;
