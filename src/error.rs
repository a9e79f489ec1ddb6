#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum AidevError {
    #[error("Template '{id}' is already registered")]
    #[diagnostic(help("Template ids must be unique within a registry"))]
    DuplicateTemplate { id: String },

    #[error("No template found for {query}")]
    #[diagnostic(help("Run `aidev list` to see the available templates"))]
    TemplateNotFound { query: String },

    #[error("Template rendering failed: {template}")]
    #[diagnostic(help("Check the template syntax and the helpers it references"))]
    RenderError {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error("Invalid partial '{name}'")]
    PartialSyntax {
        name: String,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to generate {path}")]
    FileGeneration {
        path: PathBuf,
        #[source]
        source: Box<AidevError>,
    },

    #[error("Failed to create directory {path}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target directory is not empty: {path}")]
    #[diagnostic(help("Use --force to write into it anyway, or choose a different project name"))]
    TargetNotEmpty { path: PathBuf },

    #[error("{} file(s) could not be generated: {}", failed.len(), failed.join(", "))]
    #[diagnostic(help("The rest of the project was generated; fix or remove the listed files"))]
    IncompleteGeneration { failed: Vec<String> },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Project config not found at {path}")]
    #[diagnostic(help("Run `aidev init` to create a project first"))]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to parse {path}")]
    #[diagnostic(help("Check the JSON syntax in your .ai-dev.json file"))]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse user config {path}")]
    #[diagnostic(help("Check the TOML syntax in your user config file"))]
    UserConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid project config:\n{}", issues.join("\n"))]
    ConfigInvalid { issues: Vec<String> },

    #[error("Skill not found: {id}")]
    SkillNotFound { id: String },

    #[error("git executable not found")]
    #[diagnostic(help("Install git or pass --no-git"))]
    GitNotFound,

    #[error("git {action} failed: {reason}")]
    GitCommand { action: String, reason: String },

    #[error("Prompt cancelled by user")]
    PromptCancelled,

    #[error("Stage validation failed with {} error(s)", errors.len())]
    ValidationFailed { errors: Vec<String> },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, AidevError>;

/// Flatten an error and its sources into one line, outermost first.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
