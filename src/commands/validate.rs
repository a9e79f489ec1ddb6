use std::path::PathBuf;

use console::style;
use miette::Result;

use aidev::config::project_config_exists;
use aidev::error::AidevError;
use aidev::fs::LocalFs;
use aidev::validate::{validate_project, Phase};

pub fn run(path: String, phase: Option<Phase>, strict: bool) -> Result<()> {
    let project = PathBuf::from(&path);
    let fs = LocalFs;

    let phase = phase.unwrap_or_else(|| Phase::detect(&fs, &project));
    println!(
        "{} {} phase in {}\n",
        style("Validating").bold(),
        phase,
        style(project.display()).cyan()
    );
    if !project_config_exists(&fs, &project) {
        println!(
            "  {} no .ai-dev.json found; is this an aidev project?",
            style("warning:").yellow().bold()
        );
    }

    let report = validate_project(&fs, &project, phase);
    for error in &report.errors {
        println!("  {} {error}", style("✗").red().bold());
    }
    for warning in &report.warnings {
        println!("  {} {warning}", style("!").yellow().bold());
    }

    if report.is_clean() {
        println!("  {} all checks passed", style("✓").green().bold());
        return Ok(());
    }

    println!(
        "\n{} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );

    if report.passed(strict) {
        return Ok(());
    }

    let mut errors = report.errors;
    if strict {
        errors.extend(report.warnings);
    }
    Err(AidevError::ValidationFailed { errors }.into())
}
