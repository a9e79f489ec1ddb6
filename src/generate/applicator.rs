use std::path::{Path, PathBuf};

use serde::Serialize;

use super::file::{FileGenerator, GenerateResult};
use super::variables::{prepare_variables, ProjectMetadata};
use crate::error::{AidevError, Result};
use crate::fs::FileSystem;
use crate::render::{TemplateEngine, Variables};
use crate::template::Template;

pub const INPUTS_DIR: &str = "inputs";

const INPUTS_README: &str = r#"# Client materials

> **Purpose**: holds every piece of raw material the client provides, exactly as received.
> **Rule**: add, never edit. This is the source of truth for requirements analysis.

---

## What goes here

- **Requirement documents**: feature descriptions, business process write-ups
- **Conversations**: emails, meeting notes, chat screenshots
- **References**: competitor screenshots, sketches, mood boards
- **Data samples**: spreadsheets, CSV or JSON examples
- **Contracts**: agreements and technical specifications
- **Anything else** the client hands over

---

## How to use it

1. Drop the client's files here as they arrive.
2. Prefix names with a date and a short description, for example
   `2025-12-12-requirements-email.pdf` or `2025-12-10-kickoff-notes.md`.
3. The `requirements-analyzer` skill reads this directory when analysis starts.

- Keep the original files unchanged.
- Add new files instead of replacing old ones.
- Processed output belongs in `docs/`.
- Redact sensitive information before committing.

---

## Related directories

| Directory | Contents | Role |
|-----------|----------|------|
| `inputs/` | Raw material | Source |
| `docs/` | Structured documents | Derived from `inputs/` |
| `src/` | Source code | Built from `docs/` |
"#;

/// What one [`TemplateApplicator::apply`] call produced.
#[derive(Debug)]
pub struct ApplyReport {
    pub target_dir: PathBuf,
    pub directories: Vec<PathBuf>,
    pub results: Vec<GenerateResult>,
    pub variables: Variables,
}

impl ApplyReport {
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(GenerateResult::is_success)
    }

    pub fn written(&self) -> impl Iterator<Item = &GenerateResult> {
        self.results.iter().filter(|r| r.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &GenerateResult> {
        self.results.iter().filter(|r| !r.is_success())
    }

    pub fn failed_paths(&self) -> Vec<String> {
        self.failed().map(|r| r.target_path.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFile {
    pub path: String,
    pub is_template: bool,
}

/// Side-effect-free projection of an `apply` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePreview {
    pub directories: Vec<String>,
    pub files: Vec<PreviewFile>,
    pub variables: Variables,
    pub estimated_file_count: usize,
    pub estimated_dir_count: usize,
}

/// Applies a [`Template`] to a directory tree.
pub struct TemplateApplicator<'a> {
    fs: &'a dyn FileSystem,
    generator: FileGenerator<'a>,
}

impl<'a> TemplateApplicator<'a> {
    pub fn new(fs: &'a dyn FileSystem, engine: &'a TemplateEngine) -> Self {
        Self {
            fs,
            generator: FileGenerator::new(fs, engine),
        }
    }

    pub fn generator(&self) -> &FileGenerator<'a> {
        &self.generator
    }

    /// Create the template's directories, render its files against one
    /// Variable Bag and add the `inputs/` staging directory.
    ///
    /// Directory failures abort. File failures are collected in the report
    /// and the remaining files are still written.
    pub fn apply(
        &self,
        template: &Template,
        target_dir: &Path,
        metadata: &ProjectMetadata,
    ) -> Result<ApplyReport> {
        self.ensure_dir(target_dir)?;

        let mut directories = Vec::with_capacity(template.directories.len());
        for dir in &template.directories {
            let path = target_dir.join(dir);
            self.ensure_dir(&path)?;
            directories.push(path);
        }

        let variables = prepare_variables(template, metadata);
        let results = self
            .generator
            .generate_batch(&template.files, target_dir, &variables);

        self.create_inputs_dir(target_dir)?;

        Ok(ApplyReport {
            target_dir: target_dir.to_path_buf(),
            directories,
            results,
            variables,
        })
    }

    /// Refuse a target that already holds files unless `force` is set.
    /// Empty directory trees count as empty.
    pub fn validate_target_dir(&self, target_dir: &Path, force: bool) -> Result<()> {
        if force || !self.fs.exists(target_dir) {
            return Ok(());
        }
        let files = self.fs.list_files(target_dir).map_err(|e| AidevError::Io {
            context: format!("listing {}", target_dir.display()),
            source: e,
        })?;
        if files.is_empty() {
            Ok(())
        } else {
            Err(AidevError::TargetNotEmpty {
                path: target_dir.to_path_buf(),
            })
        }
    }

    pub fn preview(&self, template: &Template, metadata: &ProjectMetadata) -> TemplatePreview {
        TemplatePreview {
            directories: template.directories.clone(),
            files: template
                .files
                .iter()
                .map(|f| PreviewFile {
                    path: f.target_path.clone(),
                    is_template: f.is_template,
                })
                .collect(),
            variables: prepare_variables(template, metadata),
            estimated_file_count: template.files.len(),
            estimated_dir_count: template.directories.len(),
        }
    }

    fn create_inputs_dir(&self, target_dir: &Path) -> Result<()> {
        let inputs = target_dir.join(INPUTS_DIR);
        self.ensure_dir(&inputs)?;
        let readme = inputs.join("README.md");
        self.fs
            .write_file(&readme, INPUTS_README)
            .map_err(|e| AidevError::FileGeneration {
                path: readme.clone(),
                source: Box::new(AidevError::Io {
                    context: "writing inputs README".into(),
                    source: e,
                }),
            })
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        self.fs
            .ensure_dir(path)
            .map_err(|e| AidevError::DirectoryCreation {
                path: path.to_path_buf(),
                source: e,
            })
    }
}
