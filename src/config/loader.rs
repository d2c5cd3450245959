//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::PeercheckConfig;
use crate::error::{PeercheckError, Result};

/// Config file names, in lookup order.
pub const CONFIG_FILES: &[&str] = &[".peercheck.yml", ".peercheck.yaml"];

/// Find the project config file in `project_root`.
pub fn find_config_file(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load the project's config, or defaults when there is no config file.
///
/// # Errors
///
/// Returns `ConfigParseError` or `ConfigValidationError` if a config file
/// exists but is unusable.
pub fn load_project_config(project_root: &Path) -> Result<PeercheckConfig> {
    match find_config_file(project_root) {
        Some(path) => {
            debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(PeercheckConfig::default()),
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PeercheckConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PeercheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PeercheckError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse and validate YAML config content.
///
/// An empty document (or one holding only comments) yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PeercheckConfig> {
    let parse_error = |e: serde_yaml::Error| PeercheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    };

    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(parse_error)?;
    if value.is_null() {
        return Ok(PeercheckConfig::default());
    }

    let config: PeercheckConfig = serde_yaml::from_value(value).map_err(parse_error)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn finds_yml_before_yaml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".peercheck.yaml"), "strict: false").unwrap();
        fs::write(temp.path().join(".peercheck.yml"), "strict: true").unwrap();

        let found = find_config_file(temp.path()).unwrap();
        assert!(found.ends_with(".peercheck.yml"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_project_config(temp.path()).unwrap();
        assert_eq!(config, PeercheckConfig::default());
    }

    #[test]
    fn loads_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".peercheck.yml"),
            "package_manager: npm\nignore: [react-dom]\n",
        )
        .unwrap();

        let config = load_project_config(temp.path()).unwrap();
        assert_eq!(config.ignore, vec!["react-dom"]);
    }

    #[test]
    fn load_config_file_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config_file(&temp.path().join(".peercheck.yml")).unwrap_err();
        assert!(matches!(err, PeercheckError::ConfigNotFound { .. }));
    }

    #[test]
    fn empty_and_comment_only_files_are_defaults() {
        let path = Path::new(".peercheck.yml");
        assert_eq!(parse_config("", path).unwrap(), PeercheckConfig::default());
        assert_eq!(
            parse_config("# nothing yet\n", path).unwrap(),
            PeercheckConfig::default()
        );
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let err = parse_config("strict: [", Path::new("/p/.peercheck.yml")).unwrap_err();
        match err {
            PeercheckError::ConfigParseError { path, .. } => {
                assert_eq!(path, PathBuf::from("/p/.peercheck.yml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let err = parse_config("strict: sometimes", Path::new(".peercheck.yml")).unwrap_err();
        assert!(matches!(err, PeercheckError::ConfigParseError { .. }));
    }

    #[test]
    fn validation_runs_after_parse() {
        let err = parse_config("packages: ['']", Path::new(".peercheck.yml")).unwrap_err();
        assert!(matches!(err, PeercheckError::ConfigValidationError { .. }));
    }
}
