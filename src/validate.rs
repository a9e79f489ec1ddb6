//! Stage-gated documentation checks.
//!
//! Each phase includes the checks of every phase before it.

use std::fmt;
use std::path::Path;

use crate::fs::FileSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum Phase {
    Requirements,
    Architecture,
    Implementation,
    Testing,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Requirements => "Requirements analysis",
            Phase::Architecture => "Architecture design",
            Phase::Implementation => "Implementation",
            Phase::Testing => "Testing",
        }
    }

    /// Guess the phase from which top-level directories exist.
    pub fn detect(fs: &dyn FileSystem, project: &Path) -> Phase {
        if fs.exists(&project.join("tests")) {
            Phase::Testing
        } else if fs.exists(&project.join("src")) {
            Phase::Implementation
        } else if fs.exists(&project.join("docs/architecture")) {
            Phase::Architecture
        } else {
            Phase::Requirements
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

const REQUIREMENT_DOCS: [&str; 3] = [
    "docs/00-project-overview.md",
    "docs/01-modules.md",
    "docs/02-user-stories.md",
];

const MODULE_DOCS: [&str; 2] = ["03-core-flow.md", "05-acceptance-criteria.md"];

const ARCHITECTURE_DOCS: [&str; 5] = [
    "docs/architecture/01-overview.md",
    "docs/architecture/02-tech-stack.md",
    "docs/architecture/03-module-design.md",
    "docs/architecture/04-data-model.md",
    "docs/architecture/05-api-design.md",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub phase: Phase,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Errors always fail. Warnings fail only in strict mode.
    pub fn passed(&self, strict: bool) -> bool {
        self.errors.is_empty() && (!strict || self.warnings.is_empty())
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn validate_project(fs: &dyn FileSystem, project: &Path, phase: Phase) -> ValidationReport {
    let mut report = ValidationReport {
        phase,
        errors: Vec::new(),
        warnings: Vec::new(),
    };

    check_requirements(fs, project, &mut report);
    if phase >= Phase::Architecture {
        require_files(fs, project, &ARCHITECTURE_DOCS, &mut report);
    }
    if phase >= Phase::Implementation && !fs.exists(&project.join("src")) {
        report.errors.push("missing directory: src/".into());
    }
    if phase >= Phase::Testing && !fs.exists(&project.join("tests")) {
        report.warnings.push("missing directory: tests/".into());
    }

    report
}

fn check_requirements(fs: &dyn FileSystem, project: &Path, report: &mut ValidationReport) {
    require_files(fs, project, &REQUIREMENT_DOCS, report);

    let modules = project.join("docs/modules");
    if !fs.exists(&modules) {
        report.warnings.push("missing directory: docs/modules/".into());
        return;
    }

    let dirs = match fs.list_dirs(&modules) {
        Ok(dirs) => dirs,
        Err(e) => {
            report
                .warnings
                .push(format!("could not read docs/modules/: {e}"));
            return;
        }
    };
    for dir in dirs {
        let module = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        for doc in MODULE_DOCS {
            if !fs.exists(&dir.join(doc)) {
                report
                    .warnings
                    .push(format!("module '{module}' is missing {doc}"));
            }
        }
    }
}

fn require_files(fs: &dyn FileSystem, project: &Path, files: &[&str], report: &mut ValidationReport) {
    for file in files {
        if !fs.exists(&project.join(file)) {
            report.errors.push(format!("missing file: {file}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_empty_project_requirements() {
        let dir = tempfile::tempdir().unwrap();
        let report = validate_project(&LocalFs, dir.path(), Phase::Requirements);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.warnings, vec!["missing directory: docs/modules/"]);
        assert!(!report.passed(false));
    }

    #[test]
    fn test_module_docs_are_warnings() {
        let dir = tempfile::tempdir().unwrap();
        for doc in REQUIREMENT_DOCS {
            touch(dir.path(), doc);
        }
        touch(dir.path(), "docs/modules/auth/03-core-flow.md");
        std::fs::create_dir_all(dir.path().join("docs/modules/billing")).unwrap();

        let report = validate_project(&LocalFs, dir.path(), Phase::Requirements);

        assert!(report.errors.is_empty());
        assert_eq!(
            report.warnings,
            vec![
                "module 'auth' is missing 05-acceptance-criteria.md",
                "module 'billing' is missing 03-core-flow.md",
                "module 'billing' is missing 05-acceptance-criteria.md",
            ]
        );
        assert!(report.passed(false));
        assert!(!report.passed(true));
    }

    #[test]
    fn test_phases_are_cumulative() {
        let dir = tempfile::tempdir().unwrap();
        let requirements = validate_project(&LocalFs, dir.path(), Phase::Requirements);
        let architecture = validate_project(&LocalFs, dir.path(), Phase::Architecture);
        let implementation = validate_project(&LocalFs, dir.path(), Phase::Implementation);
        let testing = validate_project(&LocalFs, dir.path(), Phase::Testing);

        assert_eq!(architecture.errors.len(), requirements.errors.len() + 5);
        assert_eq!(implementation.errors.len(), architecture.errors.len() + 1);
        assert_eq!(testing.errors.len(), implementation.errors.len());
        assert_eq!(testing.warnings.len(), implementation.warnings.len() + 1);
    }

    #[test]
    fn test_complete_project_is_clean() {
        let dir = tempfile::tempdir().unwrap();
        for doc in REQUIREMENT_DOCS.iter().chain(ARCHITECTURE_DOCS.iter()) {
            touch(dir.path(), doc);
        }
        for doc in MODULE_DOCS {
            touch(dir.path(), &format!("docs/modules/core/{doc}"));
        }
        touch(dir.path(), "src/main.rs");
        touch(dir.path(), "tests/smoke.rs");

        let report = validate_project(&LocalFs, dir.path(), Phase::Testing);
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn test_detect_phase() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Phase::detect(&LocalFs, dir.path()), Phase::Requirements);
        std::fs::create_dir_all(dir.path().join("docs/architecture")).unwrap();
        assert_eq!(Phase::detect(&LocalFs, dir.path()), Phase::Architecture);
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        assert_eq!(Phase::detect(&LocalFs, dir.path()), Phase::Implementation);
        std::fs::create_dir_all(dir.path().join("tests")).unwrap();
        assert_eq!(Phase::detect(&LocalFs, dir.path()), Phase::Testing);
    }
}
