//! Repository setup through the system `git` binary.

use std::path::Path;
use std::process::Command;

use crate::error::{AidevError, Result};

/// Git operations the init workflow needs.
pub trait GitClient {
    fn is_installed(&self) -> bool;
    /// Whether `dir` is the top level of a work tree. A directory nested
    /// inside another repository is not.
    fn is_repo(&self, dir: &Path) -> bool;
    fn init(&self, dir: &Path) -> Result<()>;
    fn add_all(&self, dir: &Path) -> Result<()>;
    fn commit(&self, dir: &Path, message: &str) -> Result<()>;
    fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()>;
}

/// [`GitClient`] that shells out to `git`, inheriting the user's git config.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemGit;

impl SystemGit {
    fn run(&self, dir: &Path, action: &str, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .env("GIT_TERMINAL_PROMPT", "0")
            .arg("-C")
            .arg(dir)
            .args(args)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => AidevError::GitNotFound,
                _ => AidevError::Io {
                    context: format!("running git {action}"),
                    source: e,
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AidevError::GitCommand {
                action: action.to_string(),
                reason: classify_git_error(stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl GitClient for SystemGit {
    fn is_installed(&self) -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }

    fn is_repo(&self, dir: &Path) -> bool {
        let Ok(top) = self.run(dir, "rev-parse", &["rev-parse", "--show-toplevel"]) else {
            return false;
        };
        match (std::fs::canonicalize(top), std::fs::canonicalize(dir)) {
            (Ok(top), Ok(dir)) => top == dir,
            _ => false,
        }
    }

    fn init(&self, dir: &Path) -> Result<()> {
        self.run(dir, "init", &["init"]).map(|_| ())
    }

    fn add_all(&self, dir: &Path) -> Result<()> {
        self.run(dir, "add", &["add", "."]).map(|_| ())
    }

    fn commit(&self, dir: &Path, message: &str) -> Result<()> {
        self.run(dir, "commit", &["commit", "-m", message]).map(|_| ())
    }

    fn add_remote(&self, dir: &Path, name: &str, url: &str) -> Result<()> {
        self.run(dir, "remote add", &["remote", "add", name, url])
            .map(|_| ())
    }
}

/// Turn common git failures into an actionable message.
fn classify_git_error(stderr: &str) -> String {
    if stderr.contains("Please tell me who you are") || stderr.contains("user.email") {
        format!(
            "no git identity configured; run `git config --global user.name` and `git config --global user.email`\n\ngit output:\n{stderr}"
        )
    } else if stderr.contains("nothing to commit") {
        format!("nothing to commit\n\ngit output:\n{stderr}")
    } else if stderr.contains("already exists") {
        format!("already configured\n\ngit output:\n{stderr}")
    } else {
        stderr.to_string()
    }
}
