use clap::{Args, Parser, Subcommand};

use aidev::template::ProjectType;
use aidev::validate::Phase;

#[derive(Parser)]
#[command(
    name = "aidev",
    about = "Scaffold AI-assisted projects and check their stage documentation",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project from a built-in template
    Init(InitArgs),

    /// Check a project's documentation for a development phase
    Validate {
        /// Path to the project (default: current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Phase to check (default: detected from the project layout)
        #[arg(long, value_enum)]
        phase: Option<Phase>,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// List the available templates
    List,

    /// Check a project's skill documents
    Skills {
        /// Path to the project (default: current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Copy the built-in skills into the project, backing up existing ones
        #[arg(long)]
        install: bool,
    },
}

#[derive(Args)]
pub struct InitArgs {
    /// Project name (prompted for when omitted)
    pub name: Option<String>,

    /// Project type
    #[arg(short = 't', long = "type", value_enum)]
    pub project_type: Option<ProjectType>,

    /// Template id, overriding the template picked by project type
    #[arg(long)]
    pub template: Option<String>,

    /// Write into a non-empty target directory
    #[arg(short, long)]
    pub force: bool,

    /// Initialize the current directory instead of creating a new one
    #[arg(long)]
    pub here: bool,

    /// Skip git repository setup
    #[arg(long)]
    pub no_git: bool,

    /// Remote added as `origin` after the initial commit
    #[arg(long, value_name = "URL")]
    pub git_remote: Option<String>,

    /// Do not copy skill documents into the project
    #[arg(long)]
    pub no_skills: bool,

    /// Do not suggest installing dependencies
    #[arg(long)]
    pub no_install: bool,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub author: Option<String>,

    #[arg(long)]
    pub license: Option<String>,

    /// Initial project version
    #[arg(long, value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Set template variables (can be repeated: -d key=value)
    #[arg(short, long = "data", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub data: Vec<(String, String)>,

    /// Feature to list in the generated project (can be repeated)
    #[arg(long = "feature", value_name = "FEATURE")]
    pub features: Vec<String>,

    /// Use defaults without prompting
    #[arg(short, long)]
    pub yes: bool,

    /// Show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Show per-file detail
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_init_flags() {
        let cli = Cli::try_parse_from([
            "aidev", "init", "shop", "-t", "frontend-demo", "-d", "port=3000", "-d", "x=a=b",
            "--feature", "auth", "--no-git", "-y",
        ])
        .unwrap();
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.name.as_deref(), Some("shop"));
        assert_eq!(args.project_type, Some(ProjectType::FrontendDemo));
        assert_eq!(
            args.data,
            vec![
                ("port".to_string(), "3000".to_string()),
                ("x".to_string(), "a=b".to_string())
            ]
        );
        assert_eq!(args.features, vec!["auth"]);
        assert!(args.no_git && args.yes);
    }

    #[test]
    fn rejects_malformed_data() {
        assert!(Cli::try_parse_from(["aidev", "init", "-d", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["aidev", "init", "-d", "=v"]).is_err());
    }

    #[test]
    fn parses_validate_phase() {
        let cli =
            Cli::try_parse_from(["aidev", "validate", "proj", "--phase", "architecture", "--strict"])
                .unwrap();
        let Commands::Validate {
            path,
            phase,
            strict,
        } = cli.command
        else {
            panic!("expected validate");
        };
        assert_eq!(path, "proj");
        assert_eq!(phase, Some(Phase::Architecture));
        assert!(strict);
    }
}
