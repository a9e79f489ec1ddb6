use std::path::{Path, PathBuf};

use console::style;
use miette::Result;

use aidev::fs::LocalFs;
use aidev::skills::{SkillManager, SKILLS_DIR};

pub fn run(path: String, install: bool) -> Result<()> {
    let project = PathBuf::from(&path);
    let fs = LocalFs;
    let manager = SkillManager::builtin(&fs);

    if install {
        return install_skills(&manager, &project);
    }

    let check = manager.validate_project_skills(&project)?;
    println!(
        "{} in {}\n",
        style("Skills").bold(),
        style(project.join(SKILLS_DIR).display()).cyan()
    );

    for skill in manager.get_all() {
        let present = check.dir_exists && !check.missing.contains(&skill.id);
        let mark = if present {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!(
            "  {mark} {} {}",
            style(&skill.id).bold(),
            style(format!("v{}", skill.version)).dim()
        );
        if !skill.description.is_empty() {
            println!("      {}", style(&skill.description).dim());
        }
    }

    if check.is_valid() {
        println!("\n{} all skills present", style("✓").green().bold());
    } else if !check.dir_exists {
        println!(
            "\n{} no skills directory; run `aidev skills --install` to add the built-in skills",
            style("warning:").yellow().bold()
        );
    } else {
        println!(
            "\n{} {} skill(s) missing; run `aidev skills --install` to add them",
            style("warning:").yellow().bold(),
            check.missing.len()
        );
    }

    Ok(())
}

fn install_skills(manager: &SkillManager<'_>, project: &Path) -> Result<()> {
    let ids = manager.list_ids();
    let overwrites = manager.overwrite_list(&ids, project)?;
    if !overwrites.is_empty() {
        if let Some(backup) = manager.backup_project_skills(project)? {
            println!(
                "{} backed up existing skills to {}",
                style("ℹ").blue().bold(),
                backup.display()
            );
        }
    }

    let report = manager.copy_with_report(&ids, project)?;
    for result in &report.results {
        match &result.error {
            None => println!("  {} {}", style("✓").green().bold(), result.skill_id),
            Some(e) => println!(
                "  {} {}: {}",
                style("✗").red().bold(),
                result.skill_id,
                aidev::error::error_chain(e)
            ),
        }
    }

    println!(
        "\nInstalled {} of {} skills into {}",
        report.succeeded(),
        report.total(),
        project.join(SKILLS_DIR).display()
    );
    Ok(())
}
