use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AidevError, Result};

/// Personal defaults loaded from `~/.config/aidev/config.toml`.
///
/// ```toml
/// author = "Jane Doe"
/// email = "jane@example.com"
/// license = "Apache-2.0"
/// git = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub author: Option<String>,
    pub email: Option<String>,
    pub license: Option<String>,
    /// Whether new projects get a git repository.
    pub git: Option<bool>,
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aidev").join("config.toml"))
}

/// Load the user config from the platform config directory.
///
/// Returns `Ok(None)` if there is no config file.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| AidevError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config = toml::from_str(&content).map_err(|e| AidevError::UserConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config: UserConfig = toml::from_str(
            r#"
author = "Jane Doe"
email = "jane@example.com"
license = "Apache-2.0"
git = false
"#,
        )
        .unwrap();
        assert_eq!(config.author.as_deref(), Some("Jane Doe"));
        assert_eq!(config.license.as_deref(), Some("Apache-2.0"));
        assert_eq!(config.git, Some(false));
    }

    #[test]
    fn parse_empty_config() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_user_config_from(&dir.path().join("config.toml"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not valid [[ toml").unwrap();
        let err = load_user_config_from(&path).unwrap_err();
        assert!(matches!(err, AidevError::UserConfigParse { .. }));
    }
}
