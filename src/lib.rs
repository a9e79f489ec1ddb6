pub mod config;
pub mod error;
pub mod fs;
pub mod generate;
pub mod git;
pub mod prompt;
pub mod render;
pub mod skills;
pub mod template;
pub mod ui;
pub mod validate;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::schema::{
    AuthorSection, DocumentationSection, GitSection, InstallSection, PackageManager,
    ProjectSection, SkillsSection, TemplateSection,
};
use crate::config::{save_project_config, ProjectConfig};
use crate::error::{AidevError, Result};
use crate::fs::FileSystem;
use crate::generate::{ProjectMetadata, TemplateApplicator, TemplatePreview};
use crate::git::GitClient;
use crate::render::{TemplateEngine, Variables};
use crate::skills::{SkillManager, RECOMMENDED};
use crate::template::{Template, TemplateRegistry};
use crate::ui::Ui;

const INITIAL_COMMIT_MESSAGE: &str = "Initial commit\n\nGenerated with aidev";

pub struct InitOptions {
    pub metadata: ProjectMetadata,
    /// Directory the project is created in (normally the working directory).
    pub base_dir: PathBuf,
    /// Initialize `base_dir` itself instead of `base_dir/<name>`.
    pub here: bool,
    /// Skip the empty-target check.
    pub force: bool,
    /// Use this template id instead of looking one up by project type.
    pub template_id: Option<String>,
    pub copy_skills: bool,
    pub author_email: Option<String>,
}

impl InitOptions {
    pub fn new(metadata: ProjectMetadata, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            metadata,
            base_dir: base_dir.into(),
            here: false,
            force: false,
            template_id: None,
            copy_skills: true,
            author_email: None,
        }
    }
}

/// Everything `init` would do, resolved but not yet written.
#[derive(Debug)]
pub struct InitPlan<'r> {
    pub target_dir: PathBuf,
    pub template: &'r Template,
    pub preview: TemplatePreview,
    /// Template files that already exist in the target.
    pub overwrites: Vec<PathBuf>,
    /// The `.ai-dev.json` that will be written, already validated.
    pub config: ProjectConfig,
}

#[derive(Debug)]
pub struct InitReport {
    pub project_path: PathBuf,
    pub template_id: String,
    pub files: Vec<PathBuf>,
    /// Template paths that could not be generated.
    pub failed: Vec<String>,
    pub skills_copied: usize,
    pub config_path: PathBuf,
    pub git_initialized: bool,
    pub duration: Duration,
}

impl InitReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Orchestrates `aidev init`: template application, skills, project config
/// and git setup. Collaborators are passed in so tests can substitute them.
pub struct InitWorkflow<'a> {
    fs: &'a dyn FileSystem,
    git: &'a dyn GitClient,
    registry: &'a TemplateRegistry,
    engine: &'a TemplateEngine,
    skills: &'a SkillManager<'a>,
    ui: Ui,
}

impl<'a> InitWorkflow<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        git: &'a dyn GitClient,
        registry: &'a TemplateRegistry,
        engine: &'a TemplateEngine,
        skills: &'a SkillManager<'a>,
        ui: Ui,
    ) -> Self {
        Self {
            fs,
            git,
            registry,
            engine,
            skills,
            ui,
        }
    }

    fn applicator(&self) -> TemplateApplicator<'a> {
        TemplateApplicator::new(self.fs, self.engine)
    }

    /// Validate the request and resolve target and template without writing.
    pub fn plan(&self, options: &InitOptions) -> Result<InitPlan<'a>> {
        let name = &options.metadata.project_name;
        config::check_project_name(name).map_err(|reason| AidevError::InvalidProjectName {
            name: name.clone(),
            reason,
        })?;

        let target_dir = resolve_target(options);
        let applicator = self.applicator();
        if !options.here {
            applicator.validate_target_dir(&target_dir, options.force)?;
        }

        let template = self.select_template(options)?;
        let overwrites = applicator
            .generator()
            .overwrite_list(&template.files, &target_dir);
        let preview = applicator.preview(template, &options.metadata);

        let config = build_project_config(template, options, &preview.variables);
        let issues = config::validate(&config);
        if !issues.is_empty() {
            return Err(AidevError::ConfigInvalid {
                issues: issues.iter().map(ToString::to_string).collect(),
            });
        }

        Ok(InitPlan {
            target_dir,
            template,
            preview,
            overwrites,
            config,
        })
    }

    pub fn execute(&self, options: &InitOptions) -> Result<InitReport> {
        let started = Instant::now();
        let plan = self.plan(options)?;
        let template = plan.template;
        let target_dir = plan.target_dir.clone();
        self.ui
            .info(format!("Using template {} ({})", template.name, template.id));

        let spinner = self.ui.spinner("Generating project files...");
        let applied = match self.applicator().apply(template, &target_dir, &options.metadata) {
            Ok(report) => report,
            Err(e) => {
                spinner.fail("Template application failed");
                return Err(e);
            }
        };
        let failed = applied.failed_paths();
        if failed.is_empty() {
            spinner.succeed(format!("Generated {} files", applied.results.len()));
        } else {
            spinner.warn(format!(
                "Generated {} of {} files",
                applied.written().count(),
                applied.results.len()
            ));
        }
        for result in applied.written() {
            self.ui.detail(format!("wrote {}", result.target_path));
        }

        let skills_copied = if options.copy_skills {
            self.copy_skills(&target_dir)
        } else {
            0
        };

        let spinner = self.ui.spinner("Writing project config...");
        let config_path = match save_project_config(self.fs, &target_dir, &plan.config) {
            Ok(path) => path,
            Err(e) => {
                spinner.fail("Could not write project config");
                return Err(e);
            }
        };
        spinner.succeed(format!("Wrote {}", config::CONFIG_FILE_NAME));

        let git_initialized = options.metadata.git_enabled.unwrap_or(true)
            && self.init_git(&target_dir, options.metadata.git_remote.as_deref());

        if options.metadata.install_deps.unwrap_or(true) {
            self.ui
                .info("Dependencies are not installed automatically; run `npm install` in the project");
        }

        Ok(InitReport {
            project_path: target_dir,
            template_id: template.id.clone(),
            files: applied.written().map(|r| r.path.clone()).collect(),
            failed,
            skills_copied,
            config_path,
            git_initialized,
            duration: started.elapsed(),
        })
    }

    fn select_template(&self, options: &InitOptions) -> Result<&'a Template> {
        if let Some(id) = &options.template_id {
            return self
                .registry
                .get_by_id(id)
                .ok_or_else(|| AidevError::TemplateNotFound {
                    query: format!("id '{id}'"),
                });
        }

        let project_type = options
            .metadata
            .project_type
            .ok_or_else(|| AidevError::TemplateNotFound {
                query: "an unspecified project type".into(),
            })?;
        self.registry
            .get_by_type(project_type)
            .ok_or_else(|| AidevError::TemplateNotFound {
                query: format!("project type '{project_type}'"),
            })
    }

    /// Skill copying never aborts initialization.
    fn copy_skills(&self, target_dir: &Path) -> usize {
        let spinner = self.ui.spinner("Copying skills...");
        match self.skills.copy_with_report(&self.skills.list_ids(), target_dir) {
            Ok(report) => {
                let failed = report.failed_skills();
                if failed.is_empty() {
                    spinner.succeed(format!("Copied {} skills", report.succeeded()));
                } else {
                    spinner.warn(format!("Could not copy skills: {}", failed.join(", ")));
                }
                report.succeeded()
            }
            Err(e) => {
                spinner.warn(format!(
                    "Skill copy failed: {}",
                    error::error_chain(&e)
                ));
                0
            }
        }
    }

    /// Git problems are reported as warnings. Returns whether a commit was made.
    fn init_git(&self, target_dir: &Path, remote: Option<&str>) -> bool {
        let spinner = self.ui.spinner("Initializing git repository...");
        if !self.git.is_installed() {
            spinner.warn("git is not installed, skipping repository setup");
            return false;
        }

        let result = (|| -> Result<()> {
            if !self.git.is_repo(target_dir) {
                self.git.init(target_dir)?;
            }
            self.git.add_all(target_dir)?;
            self.git.commit(target_dir, INITIAL_COMMIT_MESSAGE)?;
            if let Some(url) = remote.filter(|r| !r.is_empty()) {
                self.git.add_remote(target_dir, "origin", url)?;
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                spinner.succeed("Initialized git repository");
                true
            }
            Err(e) => {
                spinner.warn(format!("Git setup failed: {}", error::error_chain(&e)));
                false
            }
        }
    }
}

fn resolve_target(options: &InitOptions) -> PathBuf {
    if options.here {
        options.base_dir.clone()
    } else {
        options.base_dir.join(&options.metadata.project_name)
    }
}

fn build_project_config(
    template: &Template,
    options: &InitOptions,
    variables: &Variables,
) -> ProjectConfig {
    let metadata = &options.metadata;
    let custom_variables = (!metadata.custom_variables.is_empty()).then(|| {
        metadata
            .custom_variables
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    });

    ProjectConfig {
        project: ProjectSection {
            name: metadata.project_name.clone(),
            project_type: metadata.project_type.unwrap_or(template.project_type),
            version: metadata
                .version
                .clone()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| generate::variables::DEFAULT_VERSION.to_string()),
            description: metadata.description.clone().filter(|d| !d.is_empty()),
        },
        author: metadata
            .author
            .clone()
            .filter(|a| !a.is_empty())
            .map(|name| AuthorSection {
                name,
                email: options.author_email.clone(),
            }),
        git: Some(GitSection {
            enabled: metadata.git_enabled.unwrap_or(true),
            remote: metadata.git_remote.clone().filter(|r| !r.is_empty()),
        }),
        install: Some(InstallSection {
            enabled: metadata.install_deps.unwrap_or(true),
            manager: Some(PackageManager::Npm),
        }),
        template: Some(TemplateSection {
            id: template.id.clone(),
            version: variables
                .get("templateVersion")
                .and_then(|v| v.as_str())
                .map_or_else(|| template.version.clone(), String::from),
            custom_variables,
        }),
        skills: Some(SkillsSection {
            enabled: options.copy_skills,
            list: Some(RECOMMENDED.iter().map(|s| s.to_string()).collect()),
        }),
        documentation: Some(DocumentationSection {
            enabled: true,
            output_dir: Some("docs".into()),
        }),
        custom: None,
    }
}
