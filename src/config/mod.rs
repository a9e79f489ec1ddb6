pub mod schema;
pub mod user;

use std::path::{Path, PathBuf};

use serde_json::Value;

pub use schema::{
    check_project_name, default_project_config, validate, ConfigIssue, ProjectConfig,
    CONFIG_FILE_NAME,
};
pub use user::{load_user_config, UserConfig};

use crate::error::{AidevError, Result};
use crate::fs::FileSystem;

pub fn config_path(project: &Path) -> PathBuf {
    project.join(CONFIG_FILE_NAME)
}

pub fn project_config_exists(fs: &dyn FileSystem, project: &Path) -> bool {
    fs.exists(&config_path(project))
}

/// Read `.ai-dev.json`, fill unset fields from the defaults and validate.
pub fn load_project_config(fs: &dyn FileSystem, project: &Path) -> Result<ProjectConfig> {
    let path = config_path(project);
    if !fs.exists(&path) {
        return Err(AidevError::ConfigNotFound { path });
    }

    let content = fs.read_file(&path).map_err(|e| AidevError::Io {
        context: format!("reading {}", path.display()),
        source: e,
    })?;
    let parse_err = |e| AidevError::ConfigParse {
        path: path.clone(),
        source: e,
    };

    let on_disk: Value = serde_json::from_str(&content).map_err(parse_err)?;
    let mut merged = serde_json::to_value(default_project_config()).map_err(parse_err)?;
    deep_merge(&mut merged, on_disk);
    let config: ProjectConfig = serde_json::from_value(merged).map_err(parse_err)?;

    ensure_valid(&config)?;
    Ok(config)
}

/// Validate and write `config` as pretty JSON.
pub fn save_project_config(
    fs: &dyn FileSystem,
    project: &Path,
    config: &ProjectConfig,
) -> Result<PathBuf> {
    ensure_valid(config)?;

    let path = config_path(project);
    let mut content = serde_json::to_string_pretty(config).map_err(|e| AidevError::Io {
        context: format!("serializing {}", path.display()),
        source: std::io::Error::other(e),
    })?;
    content.push('\n');

    fs.write_file(&path, &content).map_err(|e| AidevError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })?;
    Ok(path)
}

/// Merge `updates` into the stored config and save the result.
pub fn update_project_config(
    fs: &dyn FileSystem,
    project: &Path,
    updates: Value,
) -> Result<ProjectConfig> {
    let current = load_project_config(fs, project)?;
    let path = config_path(project);
    let parse_err = |e| AidevError::ConfigParse {
        path: path.clone(),
        source: e,
    };

    let mut merged = serde_json::to_value(&current).map_err(parse_err)?;
    deep_merge(&mut merged, updates);
    let config: ProjectConfig = serde_json::from_value(merged).map_err(parse_err)?;

    save_project_config(fs, project, &config)?;
    Ok(config)
}

fn ensure_valid(config: &ProjectConfig) -> Result<()> {
    let issues = validate(config);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(AidevError::ConfigInvalid {
            issues: issues.iter().map(ToString::to_string).collect(),
        })
    }
}

/// Objects merge key by key. Any other value, arrays included, replaces.
fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;
    use serde_json::json;

    #[test]
    fn test_load_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"project":{"name":"demo","type":"cli-tool","version":"1.0.0"},"git":{"enabled":false}}"#,
        )
        .unwrap();

        let config = load_project_config(&LocalFs, dir.path()).unwrap();

        assert_eq!(config.project.name, "demo");
        assert_eq!(config.git.as_ref().map(|g| g.enabled), Some(false));
        assert_eq!(
            config.documentation.and_then(|d| d.output_dir).as_deref(),
            Some("docs")
        );
        assert_eq!(config.skills.and_then(|s| s.list).map(|l| l.len()), Some(4));
    }

    #[test]
    fn test_load_missing_and_malformed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_project_config(&LocalFs, dir.path()),
            Err(AidevError::ConfigNotFound { .. })
        ));

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ nope").unwrap();
        assert!(matches!(
            load_project_config(&LocalFs, dir.path()),
            Err(AidevError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{"project":{"name":"bad name","type":"cli-tool","version":"x"}}"#,
        )
        .unwrap();
        match load_project_config(&LocalFs, dir.path()) {
            Err(AidevError::ConfigInvalid { issues }) => assert_eq!(issues.len(), 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_save_round_trips_and_refuses_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let config = default_project_config();

        let path = save_project_config(&LocalFs, dir.path(), &config).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("{\n  \"project\": {"));
        assert!(project_config_exists(&LocalFs, dir.path()));
        assert_eq!(load_project_config(&LocalFs, dir.path()).unwrap(), config);

        let mut bad = config;
        bad.project.version = "one".into();
        let other = tempfile::tempdir().unwrap();
        assert!(save_project_config(&LocalFs, other.path(), &bad).is_err());
        assert!(!project_config_exists(&LocalFs, other.path()));
    }

    #[test]
    fn test_update_deep_merges() {
        let dir = tempfile::tempdir().unwrap();
        save_project_config(&LocalFs, dir.path(), &default_project_config()).unwrap();

        let updated = update_project_config(
            &LocalFs,
            dir.path(),
            json!({"project": {"description": "new"}, "skills": {"list": ["developer-guide"]}}),
        )
        .unwrap();

        assert_eq!(updated.project.name, "my-project");
        assert_eq!(updated.project.description.as_deref(), Some("new"));
        assert_eq!(
            updated.skills.and_then(|s| s.list),
            Some(vec!["developer-guide".to_string()])
        );
        assert_eq!(
            load_project_config(&LocalFs, dir.path())
                .unwrap()
                .project
                .description
                .as_deref(),
            Some("new")
        );
    }

    #[test]
    fn test_deep_merge_replaces_arrays() {
        let mut target = json!({"a": {"b": 1, "c": [1, 2]}, "d": 1});
        deep_merge(&mut target, json!({"a": {"c": [3]}, "e": true}));
        assert_eq!(target, json!({"a": {"b": 1, "c": [3]}, "d": 1, "e": true}));
    }
}
