use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::skills::RECOMMENDED;
use crate::template::ProjectType;

pub const CONFIG_FILE_NAME: &str = ".ai-dev.json";

/// Contents of `.ai-dev.json` at a project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub project: ProjectSection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<SkillsSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<DocumentationSection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSection {
    pub name: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitSection {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallSection {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<PackageManager>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSection {
    pub id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_variables: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillsSection {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationSection {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

/// Values a loaded config is merged over.
pub fn default_project_config() -> ProjectConfig {
    ProjectConfig {
        project: ProjectSection {
            name: "my-project".into(),
            project_type: ProjectType::WebFullstack,
            version: "0.1.0".into(),
            description: None,
        },
        author: None,
        git: Some(GitSection {
            enabled: true,
            remote: None,
        }),
        install: Some(InstallSection {
            enabled: true,
            manager: Some(PackageManager::Npm),
        }),
        template: None,
        skills: Some(SkillsSection {
            enabled: true,
            list: Some(RECOMMENDED.iter().map(|s| s.to_string()).collect()),
        }),
        documentation: Some(DocumentationSection {
            enabled: true,
            output_dir: Some("docs".into()),
        }),
        custom: None,
    }
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "- {}: {}", self.field, self.message)
    }
}

/// Check a project name: 1 to 100 letters, digits, `-` or `_`.
pub fn check_project_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("must not be empty".into());
    }
    if name.chars().count() > 100 {
        return Err("must be at most 100 characters".into());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("may only contain letters, digits, '-' and '_'".into());
    }
    Ok(())
}

/// Every rule the config breaks. Empty when the config is valid.
pub fn validate(config: &ProjectConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    let mut issue = |field: &'static str, message: String| {
        issues.push(ConfigIssue { field, message });
    };

    if let Err(reason) = check_project_name(&config.project.name) {
        issue("project.name", format!("project name {reason}"));
    }

    if !matches(r"^\d+\.\d+\.\d+$", &config.project.version) {
        issue(
            "project.version",
            format!(
                "'{}' is not a semver version (e.g. 1.0.0)",
                config.project.version
            ),
        );
    }

    if let Some(author) = &config.author {
        if author.name.trim().is_empty() {
            issue("author.name", "author name must not be empty".into());
        }
        if let Some(email) = &author.email {
            if !matches(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email) {
                issue("author.email", format!("'{email}' is not a valid email address"));
            }
        }
    }

    if let Some(remote) = config.git.as_ref().and_then(|g| g.remote.as_deref()) {
        if !matches(r"^(https?://|git@).+\.git$", remote) {
            issue(
                "git.remote",
                format!("'{remote}' is not a git remote URL (https://... .git or git@... .git)"),
            );
        }
    }

    issues
}

fn matches(pattern: &str, input: &str) -> bool {
    regex_lite::Regex::new(pattern)
        .map(|re| re.is_match(input))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_is_valid() {
        assert!(validate(&default_project_config()).is_empty());
    }

    #[rstest]
    #[case("my-project", true)]
    #[case("My_Project2", true)]
    #[case("", false)]
    #[case("has space", false)]
    #[case("dots.not.allowed", false)]
    #[case("ünïcode", false)]
    fn test_check_project_name(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(check_project_name(name).is_ok(), ok);
    }

    #[test]
    fn test_name_length_limit() {
        assert!(check_project_name(&"a".repeat(100)).is_ok());
        assert!(check_project_name(&"a".repeat(101)).is_err());
    }

    #[rstest]
    #[case("https://github.com/me/repo.git", true)]
    #[case("git@github.com:me/repo.git", true)]
    #[case("http://host/x.git", true)]
    #[case("https://github.com/me/repo", false)]
    #[case("ftp://host/repo.git", false)]
    fn test_git_remote_rule(#[case] remote: &str, #[case] ok: bool) {
        let mut config = default_project_config();
        config.git = Some(GitSection {
            enabled: true,
            remote: Some(remote.into()),
        });
        assert_eq!(validate(&config).is_empty(), ok);
    }

    #[test]
    fn test_collects_every_issue() {
        let mut config = default_project_config();
        config.project.name = "bad name".into();
        config.project.version = "1.0".into();
        config.author = Some(AuthorSection {
            name: "  ".into(),
            email: Some("nope".into()),
        });

        let fields: Vec<_> = validate(&config).iter().map(|i| i.field).collect();
        assert_eq!(
            fields,
            vec!["project.name", "project.version", "author.name", "author.email"]
        );
    }

    #[test]
    fn test_serializes_camel_case_and_skips_none() {
        let mut config = default_project_config();
        config.template = Some(TemplateSection {
            id: "frontend-demo".into(),
            version: "1.0.0".into(),
            custom_variables: None,
        });
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["project"]["type"], "web-fullstack");
        assert_eq!(json["documentation"]["outputDir"], "docs");
        assert_eq!(json["install"]["manager"], "npm");
        assert!(json.get("author").is_none());
        assert!(json["template"].get("customVariables").is_none());
    }
}
