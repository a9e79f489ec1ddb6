mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Validate {
            path,
            phase,
            strict,
        } => commands::validate::run(path, phase, strict),
        Commands::List => commands::list::run(),
        Commands::Skills { path, install } => commands::skills::run(path, install),
    }
}
