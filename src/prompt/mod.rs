//! Interactive questions asked by `aidev init`.

use std::fmt;

use inquire::validator::{ErrorMessage, Validation};

use crate::config::check_project_name;
use crate::error::{AidevError, Result};
use crate::template::ProjectType;

pub fn project_name(default: Option<&str>) -> Result<String> {
    let mut prompt = inquire::Text::new("Project name:").with_validator(|input: &str| {
        Ok(match check_project_name(input.trim()) {
            Ok(()) => Validation::Valid,
            Err(reason) => Validation::Invalid(ErrorMessage::Custom(format!(
                "Project name {reason}"
            ))),
        })
    });
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }
    let answer = prompt.prompt().map_err(|_| AidevError::PromptCancelled)?;
    Ok(answer.trim().to_string())
}

struct TypeChoice {
    project_type: ProjectType,
    has_template: bool,
}

impl fmt::Display for TypeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.project_type.label(), self.project_type)?;
        if !self.has_template {
            f.write_str(" - no template yet")?;
        }
        Ok(())
    }
}

/// Pick a project type. Types listed in `available` are offered first.
pub fn project_type(available: &[ProjectType]) -> Result<ProjectType> {
    let mut choices: Vec<TypeChoice> = available
        .iter()
        .map(|&project_type| TypeChoice {
            project_type,
            has_template: true,
        })
        .collect();
    choices.extend(
        ProjectType::ALL
            .into_iter()
            .filter(|t| !available.contains(t))
            .map(|project_type| TypeChoice {
                project_type,
                has_template: false,
            }),
    );

    let answer = inquire::Select::new("Project type:", choices)
        .prompt()
        .map_err(|_| AidevError::PromptCancelled)?;
    Ok(answer.project_type)
}

/// Optional free text. An empty answer is `None`.
pub fn optional_text(message: &str, default: Option<&str>) -> Result<Option<String>> {
    let mut prompt = inquire::Text::new(message).with_help_message("Press enter to skip");
    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }
    let answer = prompt.prompt().map_err(|_| AidevError::PromptCancelled)?;
    let answer = answer.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

pub fn confirm(message: &str, default: bool) -> Result<bool> {
    inquire::Confirm::new(message)
        .with_default(default)
        .prompt()
        .map_err(|_| AidevError::PromptCancelled)
}
