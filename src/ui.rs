//! Terminal output: styled status lines and spinners.

use std::fmt::Display;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Status output for commands. A quiet `Ui` prints nothing, which keeps the
/// library usable from tests and other callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ui {
    verbose: bool,
    quiet: bool,
}

impl Ui {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
        }
    }

    pub fn quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
        }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    pub fn title(&self, msg: impl Display) {
        if !self.quiet {
            println!("\n{}\n", style(msg).bold().underlined());
        }
    }

    pub fn info(&self, msg: impl Display) {
        if !self.quiet {
            println!("{} {msg}", style("•").cyan());
        }
    }

    pub fn success(&self, msg: impl Display) {
        if !self.quiet {
            println!("{} {msg}", style("✓").green().bold());
        }
    }

    pub fn warn(&self, msg: impl Display) {
        if !self.quiet {
            eprintln!("{} {}", style("warning:").yellow().bold(), style(msg).yellow());
        }
    }

    pub fn error(&self, msg: impl Display) {
        if !self.quiet {
            eprintln!("{} {}", style("✗").red().bold(), style(msg).red());
        }
    }

    /// Indented line under the previous status line.
    pub fn item(&self, msg: impl Display) {
        if !self.quiet {
            println!("    {msg}");
        }
    }

    /// Only shown with `--verbose`.
    pub fn detail(&self, msg: impl Display) {
        if self.is_verbose() {
            println!("  {} {}", style("›").dim(), style(msg).dim());
        }
    }

    pub fn blank(&self) {
        if !self.quiet {
            println!();
        }
    }

    pub fn spinner(&self, msg: impl Into<String>) -> Spinner {
        if self.quiet {
            return Spinner { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message(msg.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Spinner { bar: Some(bar) }
    }
}

/// A running spinner. Finishing replaces it with a status line.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn succeed(self, msg: impl Display) {
        self.finish(format!("{} {msg}", style("✓").green().bold()));
    }

    pub fn warn(self, msg: impl Display) {
        self.finish(format!("{} {}", style("!").yellow().bold(), style(msg).yellow()));
    }

    pub fn fail(self, msg: impl Display) {
        self.finish(format!("{} {}", style("✗").red().bold(), style(msg).red()));
    }

    fn finish(mut self, line: String) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
            println!("{line}");
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar {
            if !bar.is_finished() {
                bar.finish_and_clear();
            }
        }
    }
}
