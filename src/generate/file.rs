use std::path::{Path, PathBuf};

use crate::error::{AidevError, Result};
use crate::fs::FileSystem;
use crate::render::{TemplateEngine, Variables};
use crate::template::TemplateFile;

/// Outcome of materializing one file inside a batch.
#[derive(Debug)]
pub struct GenerateResult {
    /// Path as declared by the template.
    pub target_path: String,
    /// Resolved path on disk.
    pub path: PathBuf,
    pub error: Option<AidevError>,
}

impl GenerateResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Writes [`TemplateFile`]s into a target directory.
pub struct FileGenerator<'a> {
    fs: &'a dyn FileSystem,
    engine: &'a TemplateEngine,
}

impl<'a> FileGenerator<'a> {
    pub fn new(fs: &'a dyn FileSystem, engine: &'a TemplateEngine) -> Self {
        Self { fs, engine }
    }

    /// Materialize one file below `target_dir` and return where it was written.
    pub fn generate(
        &self,
        file: &TemplateFile,
        target_dir: &Path,
        variables: &Variables,
    ) -> Result<PathBuf> {
        let path = target_dir.join(&file.target_path);
        let fail = |source: AidevError| AidevError::FileGeneration {
            path: path.clone(),
            source: Box::new(source),
        };

        if let Some(parent) = path.parent() {
            self.fs.ensure_dir(parent).map_err(|e| {
                fail(AidevError::DirectoryCreation {
                    path: parent.to_path_buf(),
                    source: e,
                })
            })?;
        }

        let content = self.preview(file, variables).map_err(fail)?;

        self.fs.write_file(&path, &content).map_err(|e| {
            fail(AidevError::Io {
                context: "writing generated file".into(),
                source: e,
            })
        })?;

        Ok(path)
    }

    /// Materialize every file independently. A failure is recorded in that
    /// file's result and generation moves on to the next one.
    pub fn generate_batch(
        &self,
        files: &[TemplateFile],
        target_dir: &Path,
        variables: &Variables,
    ) -> Vec<GenerateResult> {
        files
            .iter()
            .map(|file| match self.generate(file, target_dir, variables) {
                Ok(path) => GenerateResult {
                    target_path: file.target_path.clone(),
                    path,
                    error: None,
                },
                Err(e) => GenerateResult {
                    target_path: file.target_path.clone(),
                    path: target_dir.join(&file.target_path),
                    error: Some(e),
                },
            })
            .collect()
    }

    /// The exact content [`generate`](Self::generate) would write.
    pub fn preview(&self, file: &TemplateFile, variables: &Variables) -> Result<String> {
        if file.is_template {
            self.engine
                .render_named(&file.target_path, &file.content, variables)
        } else {
            Ok(file.content.clone())
        }
    }

    pub fn will_overwrite(&self, file: &TemplateFile, target_dir: &Path) -> bool {
        self.fs.exists(&target_dir.join(&file.target_path))
    }

    /// Resolved paths of every file in `files` that already exists.
    pub fn overwrite_list(&self, files: &[TemplateFile], target_dir: &Path) -> Vec<PathBuf> {
        files
            .iter()
            .filter(|file| self.will_overwrite(file, target_dir))
            .map(|file| target_dir.join(&file.target_path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;
    use tera::Value;

    fn vars() -> Variables {
        let mut vars = Variables::new();
        vars.insert("projectName".into(), Value::String("demo".into()));
        vars
    }

    #[test]
    fn test_static_file_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new();
        let generator = FileGenerator::new(&LocalFs, &engine);
        let file = TemplateFile::verbatim("raw/{{x}}.txt", "{{ not rendered }} {% nope %}");

        let path = generator.generate(&file, dir.path(), &vars()).unwrap();

        assert_eq!(path, dir.path().join("raw/{{x}}.txt"));
        assert_eq!(
            std::fs::read_to_string(path).unwrap(),
            "{{ not rendered }} {% nope %}"
        );
    }

    #[test]
    fn test_template_file_is_rendered_into_new_parent() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new();
        let generator = FileGenerator::new(&LocalFs, &engine);
        let file = TemplateFile::rendered("deep/nested/README.md", "# {{ projectName }}");

        generator.generate(&file, dir.path(), &vars()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join("deep/nested/README.md")).unwrap(),
            "# demo"
        );
    }

    #[test]
    fn test_render_failure_names_path_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new();
        let generator = FileGenerator::new(&LocalFs, &engine);
        let file = TemplateFile::rendered("bad.md", "{% if %}");

        let err = generator.generate(&file, dir.path(), &vars()).unwrap_err();

        match err {
            AidevError::FileGeneration { path, source } => {
                assert_eq!(path, dir.path().join("bad.md"));
                assert!(matches!(*source, AidevError::RenderError { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!dir.path().join("bad.md").exists());
    }

    #[test]
    fn test_batch_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new();
        let generator = FileGenerator::new(&LocalFs, &engine);
        let files = vec![
            TemplateFile::rendered("a.md", "{{ projectName }}-a"),
            TemplateFile::rendered("b.md", "{{ projectName | nope }}"),
            TemplateFile::verbatim("c.md", "c"),
        ];

        let results = generator.generate_batch(&files, dir.path(), &vars());

        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert_eq!(results[1].target_path, "b.md");
        assert!(results[2].is_success());
        assert_eq!(std::fs::read_to_string(dir.path().join("a.md")).unwrap(), "demo-a");
        assert_eq!(std::fs::read_to_string(dir.path().join("c.md")).unwrap(), "c");
    }

    #[test]
    fn test_preview_matches_written_content() {
        let dir = tempfile::tempdir().unwrap();
        let engine = TemplateEngine::new();
        let generator = FileGenerator::new(&LocalFs, &engine);
        let file = TemplateFile::rendered("x.md", "{{ projectName | pascalCase }}!");

        let preview = generator.preview(&file, &vars()).unwrap();
        let path = generator.generate(&file, dir.path(), &vars()).unwrap();

        assert_eq!(preview, std::fs::read_to_string(path).unwrap());
        assert_eq!(preview, "Demo!");
    }

    #[test]
    fn test_overwrite_detection() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("exists.md"), "old").unwrap();
        let engine = TemplateEngine::new();
        let generator = FileGenerator::new(&LocalFs, &engine);
        let files = vec![
            TemplateFile::verbatim("exists.md", "new"),
            TemplateFile::verbatim("fresh.md", "new"),
        ];

        assert!(generator.will_overwrite(&files[0], dir.path()));
        assert!(!generator.will_overwrite(&files[1], dir.path()));
        assert_eq!(
            generator.overwrite_list(&files, dir.path()),
            vec![dir.path().join("exists.md")]
        );
        // detection is read-only
        assert_eq!(std::fs::read_to_string(dir.path().join("exists.md")).unwrap(), "old");
        assert!(!dir.path().join("fresh.md").exists());
    }
}
