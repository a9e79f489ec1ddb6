use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use aidev::config::{load_user_config, UserConfig};
use aidev::error::AidevError;
use aidev::fs::{FileSystem, LocalFs};
use aidev::generate::diff::{change_counts, unified_diff};
use aidev::generate::{ProjectMetadata, TemplateApplicator};
use aidev::git::SystemGit;
use aidev::prompt;
use aidev::render::TemplateEngine;
use aidev::skills::SkillManager;
use aidev::template::{ProjectType, TemplateRegistry};
use aidev::ui::Ui;
use aidev::{InitOptions, InitPlan, InitWorkflow};

use crate::cli::InitArgs;

pub fn run(args: InitArgs) -> Result<()> {
    let ui = Ui::new(args.verbose);
    let fs = LocalFs;
    let registry = TemplateRegistry::new();
    let engine = TemplateEngine::new();
    let skills = SkillManager::builtin(&fs);
    let git = SystemGit;

    let cwd = std::env::current_dir().into_diagnostic()?;
    let user = load_user_config()?.unwrap_or_default();
    let interactive = !args.yes && console::user_attended();

    let template_type = args
        .template
        .as_deref()
        .and_then(|id| registry.get_by_id(id))
        .map(|t| t.project_type);
    let metadata = collect_metadata(&args, &user, &registry, &cwd, template_type, interactive)?;
    let project_name = metadata.project_name.clone();

    let options = InitOptions {
        metadata,
        base_dir: cwd,
        here: args.here,
        force: args.force,
        template_id: args.template.clone(),
        copy_skills: !args.no_skills,
        author_email: user.email.clone(),
    };
    let workflow = InitWorkflow::new(&fs, &git, &registry, &engine, &skills, ui);

    if args.dry_run {
        let plan = workflow.plan(&options)?;
        print_plan(&plan, &fs, &engine, &options, args.verbose);
        return Ok(());
    }

    ui.title(format!("Creating {project_name}"));
    let report = workflow.execute(&options)?;

    if !report.is_complete() {
        ui.error(format!(
            "{} of {} files could not be generated:",
            report.failed.len(),
            report.failed.len() + report.files.len()
        ));
        for path in &report.failed {
            ui.item(path);
        }
        return Err(AidevError::IncompleteGeneration {
            failed: report.failed,
        }
        .into());
    }

    ui.blank();
    ui.success(format!(
        "Project {} created in {:.1}s",
        style(&project_name).cyan().bold(),
        report.duration.as_secs_f64()
    ));
    ui.detail(format!(
        "{} files, {} skills, template {}",
        report.files.len(),
        report.skills_copied,
        report.template_id
    ));

    ui.blank();
    ui.info("Next steps:");
    if !args.here {
        ui.item(format!("cd {project_name}"));
    }
    ui.item("Put client materials in inputs/");
    ui.item("Read README.md to get started");

    Ok(())
}

/// Fill project metadata from flags, then user config, then prompts.
fn collect_metadata(
    args: &InitArgs,
    user: &UserConfig,
    registry: &TemplateRegistry,
    cwd: &Path,
    template_type: Option<ProjectType>,
    interactive: bool,
) -> Result<ProjectMetadata> {
    let dir_name = args
        .here
        .then(|| cwd.file_name().map(|n| n.to_string_lossy().into_owned()))
        .flatten();

    let project_name = match (&args.name, interactive) {
        (Some(name), _) => name.clone(),
        (None, true) => prompt::project_name(dir_name.as_deref())?,
        (None, false) => dir_name.unwrap_or_default(),
    };

    let project_type = match (args.project_type.or(template_type), interactive) {
        (Some(project_type), _) => project_type,
        (None, true) => prompt::project_type(&registry.list_types())?,
        (None, false) => ProjectType::WebFullstack,
    };

    let description = match (&args.description, interactive) {
        (Some(description), _) => Some(description.clone()),
        (None, true) => prompt::optional_text("Description:", None)?,
        (None, false) => None,
    };

    let default_author = args.author.clone().or_else(|| user.author.clone());
    let author = match (&args.author, interactive) {
        (Some(author), _) => Some(author.clone()),
        (None, true) => prompt::optional_text("Author:", default_author.as_deref())?,
        (None, false) => default_author,
    };

    let mut metadata = ProjectMetadata::new(project_name);
    metadata.project_type = Some(project_type);
    metadata.description = description;
    metadata.author = author;
    metadata.version = args.project_version.clone();
    metadata.license = args.license.clone().or_else(|| user.license.clone());
    metadata.git_enabled = Some(!args.no_git && user.git.unwrap_or(true));
    metadata.git_remote = args.git_remote.clone();
    metadata.install_deps = Some(!args.no_install);
    metadata.features = args.features.clone();
    metadata.custom_variables = args
        .data
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    Ok(metadata)
}

fn print_plan(
    plan: &InitPlan<'_>,
    fs: &dyn FileSystem,
    engine: &TemplateEngine,
    options: &InitOptions,
    verbose: bool,
) {
    let preview = &plan.preview;
    println!(
        "\n{} Dry run: template {} into {}",
        style("==>").cyan().bold(),
        style(&plan.template.id).bold(),
        style(plan.target_dir.display()).cyan()
    );

    for dir in &preview.directories {
        println!("  {} {dir}/", style("mkdir ").blue());
    }

    let applicator = TemplateApplicator::new(fs, engine);
    let generator = applicator.generator();
    for file in &plan.template.files {
        let target = plan.target_dir.join(&file.target_path);
        let action = if file.is_template { "render" } else { "copy  " };
        let marker = if plan.overwrites.contains(&target) {
            style(" (overwrite)").yellow().to_string()
        } else {
            String::new()
        };
        println!("  {} {}{marker}", style(action).green(), file.target_path);

        if !verbose {
            continue;
        }
        match generator.preview(file, &preview.variables) {
            Ok(content) => print_content(fs, &target, &file.target_path, &content),
            Err(e) => println!(
                "  {} {}",
                style("✗").red(),
                style(aidev::error::error_chain(&e)).red()
            ),
        }
    }

    let rendered = preview.files.iter().filter(|f| f.is_template).count();
    println!(
        "\nSummary: {} rendered, {} copied, {} directories, {} existing files overwritten",
        rendered,
        preview.estimated_file_count - rendered,
        preview.estimated_dir_count,
        plan.overwrites.len()
    );
    if options.copy_skills {
        println!("Skills would be copied into .claude/skills/");
    }
    println!(
        "\n{} Dry run: no files written.",
        style("ℹ").blue().bold()
    );
}

fn print_content(fs: &dyn FileSystem, target: &Path, label: &str, content: &str) {
    println!("  {}", style("──────").dim());
    match fs.read_file(target) {
        Ok(existing) if existing == content => println!("  {}", style("[unchanged]").dim()),
        Ok(existing) => {
            let (added, removed) = change_counts(&existing, content);
            println!(
                "  {}",
                style(format!("{added} line(s) added, {removed} removed")).dim()
            );
            for line in unified_diff(&existing, content, Path::new(label)).lines() {
                let styled = match line.chars().next() {
                    Some('+') => style(line).green(),
                    Some('-') => style(line).red(),
                    Some('@') => style(line).cyan(),
                    _ => style(line),
                };
                println!("  {styled}");
            }
        }
        Err(_) => {
            for line in content.lines() {
                println!("  {line}");
            }
        }
    }
    println!("  {}", style("──────").dim());
    println!();
}
