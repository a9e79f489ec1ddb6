pub mod builtin;
pub mod registry;

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use registry::TemplateRegistry;

/// Project category a template is built for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    WebFullstack,
    FrontendDemo,
    MobileApp,
    BackendApi,
    CliTool,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::WebFullstack,
        ProjectType::FrontendDemo,
        ProjectType::MobileApp,
        ProjectType::BackendApi,
        ProjectType::CliTool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::WebFullstack => "web-fullstack",
            ProjectType::FrontendDemo => "frontend-demo",
            ProjectType::MobileApp => "mobile-app",
            ProjectType::BackendApi => "backend-api",
            ProjectType::CliTool => "cli-tool",
        }
    }

    /// Human-readable label for prompts and listings.
    pub fn label(self) -> &'static str {
        match self {
            ProjectType::WebFullstack => "Web full-stack application",
            ProjectType::FrontendDemo => "Frontend-only demo",
            ProjectType::MobileApp => "Mobile application",
            ProjectType::BackendApi => "Backend API service",
            ProjectType::CliTool => "Command-line tool",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file blueprint inside a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFile {
    /// Relative, `/`-separated path below the project root.
    pub target_path: String,
    pub content: String,
    /// Render `content` before writing. Static files are written byte-for-byte.
    pub is_template: bool,
}

impl TemplateFile {
    pub fn rendered(target_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            content: content.into(),
            is_template: true,
        }
    }

    pub fn verbatim(target_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target_path: target_path.into(),
            content: content.into(),
            is_template: false,
        }
    }
}

/// A named bundle of directories, files and script hints for one project type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub name: String,
    pub version: String,
    pub description: String,
    pub directories: Vec<String>,
    pub files: Vec<TemplateFile>,
    /// Package script hints. Informational only, never executed.
    pub scripts: IndexMap<String, String>,
}

impl Template {
    pub fn new(id: impl Into<String>, project_type: ProjectType, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_type,
            name: name.into(),
            version: "1.0.0".to_string(),
            description: String::new(),
            directories: Vec::new(),
            files: Vec::new(),
            scripts: IndexMap::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn directories<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directories.extend(dirs.into_iter().map(Into::into));
        self
    }

    pub fn file(mut self, file: TemplateFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn files(mut self, files: impl IntoIterator<Item = TemplateFile>) -> Self {
        self.files.extend(files);
        self
    }

    pub fn script(mut self, name: impl Into<String>, command: impl Into<String>) -> Self {
        self.scripts.insert(name.into(), command.into());
        self
    }
}
