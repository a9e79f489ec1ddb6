//! Variable Bag preparation.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tera::Value;

use crate::render::Variables;
use crate::template::{ProjectType, Template};

pub const DEFAULT_AUTHOR: &str = "AI Developer";
pub const DEFAULT_VERSION: &str = "0.1.0";
pub const DEFAULT_LICENSE: &str = "MIT";

/// Caller-supplied description of the project being created.
///
/// Optional strings that are empty count as not supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMetadata {
    pub project_name: String,
    /// Falls back to the template's own type.
    pub project_type: Option<ProjectType>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    /// Defaults to enabled.
    pub git_enabled: Option<bool>,
    pub git_remote: Option<String>,
    /// Defaults to enabled.
    pub install_deps: Option<bool>,
    pub features: Vec<String>,
    /// Spread over the computed bag last; wins over every other source.
    pub custom_variables: BTreeMap<String, Value>,
}

impl ProjectMetadata {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }
}

/// Build the Variable Bag for one application of `template`.
pub fn prepare_variables(template: &Template, metadata: &ProjectMetadata) -> Variables {
    prepare_variables_at(template, metadata, Utc::now())
}

/// [`prepare_variables`] with a fixed clock.
pub fn prepare_variables_at(
    template: &Template,
    metadata: &ProjectMetadata,
    now: DateTime<Utc>,
) -> Variables {
    let project_type = metadata.project_type.unwrap_or(template.project_type);
    let description = supplied(&metadata.description)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{} - {} project", metadata.project_name, template.name));

    let mut vars = Variables::new();
    let mut set = |key: &str, value: Value| {
        vars.insert(key.to_string(), value);
    };

    set("projectName", Value::String(metadata.project_name.clone()));
    set("projectType", Value::String(project_type.to_string()));
    set("description", Value::String(description));
    set(
        "author",
        text(supplied(&metadata.author).unwrap_or(DEFAULT_AUTHOR)),
    );
    set(
        "version",
        text(supplied(&metadata.version).unwrap_or(DEFAULT_VERSION)),
    );
    set(
        "license",
        text(supplied(&metadata.license).unwrap_or(DEFAULT_LICENSE)),
    );

    set("templateId", Value::String(template.id.clone()));
    set("templateVersion", Value::String(template.version.clone()));

    set(
        "createdAt",
        Value::String(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    set("year", Value::from(now.year()));

    set("gitEnabled", Value::Bool(metadata.git_enabled.unwrap_or(true)));
    set(
        "gitRemote",
        text(supplied(&metadata.git_remote).unwrap_or_default()),
    );
    set("installDeps", Value::Bool(metadata.install_deps.unwrap_or(true)));
    set(
        "features",
        Value::Array(metadata.features.iter().cloned().map(Value::String).collect()),
    );

    for (key, value) in &metadata.custom_variables {
        vars.insert(key.clone(), value.clone());
    }

    vars
}

fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn text(s: &str) -> Value {
    Value::String(s.to_string())
}
