use console::style;
use miette::Result;

use aidev::template::{ProjectType, Template, TemplateRegistry};

pub fn run() -> Result<()> {
    let registry = TemplateRegistry::new();

    println!(
        "{} ({} template{})\n",
        style("Available templates").bold(),
        registry.count(),
        if registry.count() == 1 { "" } else { "s" }
    );

    for template in registry.get_all() {
        print_template(template);
    }

    let covered = registry.list_types();
    let uncovered: Vec<&str> = ProjectType::ALL
        .into_iter()
        .filter(|t| !covered.contains(t))
        .map(|t| t.as_str())
        .collect();
    if !uncovered.is_empty() {
        println!(
            "{} {}",
            style("No template yet for:").dim(),
            uncovered.join(", ")
        );
    }

    Ok(())
}

fn print_template(template: &Template) {
    println!(
        "  {} {}",
        style(&template.id).cyan().bold(),
        style(format!("v{}", template.version)).dim()
    );
    println!("  {}    {}", style("name:").dim(), template.name);
    println!("  {}    {}", style("type:").dim(), template.project_type);
    if !template.description.is_empty() {
        println!("  {}    {}", style("about:").dim(), template.description);
    }
    println!(
        "  {}   {} files, {} directories",
        style("files:").dim(),
        template.files.len(),
        template.directories.len()
    );
    if !template.scripts.is_empty() {
        let scripts: Vec<&str> = template.scripts.keys().map(String::as_str).collect();
        println!("  {} {}", style("scripts:").dim(), scripts.join(", "));
    }
    println!();
}
