//! Skill documents: assistant playbooks copied into `.claude/skills/`.

pub mod copier;
pub mod loader;

use std::path::{Path, PathBuf};

use chrono::Utc;
use indexmap::IndexMap;

pub use copier::{CopyReport, CopyResult, SkillCopier};

use crate::error::{AidevError, Result};
use crate::fs::FileSystem;

pub const SKILLS_DIR: &str = ".claude/skills";

pub const RECOMMENDED: [&str; 4] = [
    "requirements-analyzer",
    "architecture-designer",
    "developer-guide",
    "test-planner",
];

const BUILTIN: [(&str, &str); 4] = [
    (
        "requirements-analyzer",
        include_str!("../../assets/skills/requirements-analyzer.md"),
    ),
    (
        "architecture-designer",
        include_str!("../../assets/skills/architecture-designer.md"),
    ),
    (
        "developer-guide",
        include_str!("../../assets/skills/developer-guide.md"),
    ),
    (
        "test-planner",
        include_str!("../../assets/skills/test-planner.md"),
    ),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillSource {
    Builtin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    pub content: String,
    pub source: SkillSource,
}

impl Skill {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.id)
    }
}

/// Result of checking a project's `.claude/skills/` against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCheck {
    pub dir_exists: bool,
    pub missing: Vec<String>,
}

impl SkillCheck {
    pub fn is_valid(&self) -> bool {
        self.dir_exists && self.missing.is_empty()
    }
}

/// Catalog of skills available to copy into projects.
pub struct SkillManager<'a> {
    fs: &'a dyn FileSystem,
    skills: IndexMap<String, Skill>,
}

impl<'a> SkillManager<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            skills: IndexMap::new(),
        }
    }

    /// A catalog holding the embedded skill documents.
    pub fn builtin(fs: &'a dyn FileSystem) -> Self {
        let mut manager = Self::new(fs);
        for (stem, content) in BUILTIN {
            manager.insert(loader::parse_skill(content, stem, SkillSource::Builtin));
        }
        manager
    }

    /// Add every skill found in `dir`, replacing skills with the same id.
    pub fn load_from_directory(&mut self, dir: &Path) -> Result<usize> {
        let skills = loader::load_from_directory(self.fs, dir)?;
        let count = skills.len();
        for skill in skills {
            self.insert(skill);
        }
        Ok(count)
    }

    pub fn insert(&mut self, skill: Skill) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn get(&self, id: &str) -> Option<&Skill> {
        self.skills.get(id)
    }

    pub fn get_all(&self) -> Vec<&Skill> {
        self.skills.values().collect()
    }

    pub fn has(&self, id: &str) -> bool {
        self.skills.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.skills.len()
    }

    pub fn list_ids(&self) -> Vec<&str> {
        self.skills.keys().map(String::as_str).collect()
    }

    pub fn recommended(&self) -> Vec<&'static str> {
        RECOMMENDED.to_vec()
    }

    /// Copy the named skills. Any unknown id fails before anything is written.
    pub fn copy_to_project(&self, ids: &[&str], project: &Path) -> Result<Vec<PathBuf>> {
        let skills = self.resolve(ids)?;
        self.copier().copy_skills(&skills, project)
    }

    pub fn copy_all_to_project(&self, project: &Path) -> Result<Vec<PathBuf>> {
        self.copier().copy_skills(&self.get_all(), project)
    }

    pub fn copy_with_report(&self, ids: &[&str], project: &Path) -> Result<CopyReport> {
        let skills = self.resolve(ids)?;
        self.copier().copy_with_report(&skills, project)
    }

    pub fn overwrite_list(&self, ids: &[&str], project: &Path) -> Result<Vec<String>> {
        let skills = self.resolve(ids)?;
        Ok(self.copier().overwrite_list(&skills, project))
    }

    /// Report which catalog skills a project lacks.
    pub fn validate_project_skills(&self, project: &Path) -> Result<SkillCheck> {
        let dir = project.join(SKILLS_DIR);
        if !self.fs.exists(&dir) {
            return Ok(SkillCheck {
                dir_exists: false,
                missing: self.list_ids().into_iter().map(String::from).collect(),
            });
        }

        let present = loader::load_from_directory(self.fs, &dir)?;
        let missing = self
            .skills
            .keys()
            .filter(|id| !present.iter().any(|s| &s.id == *id))
            .cloned()
            .collect();

        Ok(SkillCheck {
            dir_exists: true,
            missing,
        })
    }

    pub fn backup_project_skills(&self, project: &Path) -> Result<Option<PathBuf>> {
        self.copier().backup(project, Utc::now())
    }

    fn resolve(&self, ids: &[&str]) -> Result<Vec<&Skill>> {
        ids.iter()
            .map(|id| {
                self.get(id).ok_or_else(|| AidevError::SkillNotFound {
                    id: (*id).to_string(),
                })
            })
            .collect()
    }

    fn copier(&self) -> SkillCopier<'a> {
        SkillCopier::new(self.fs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;

    #[test]
    fn test_builtin_catalog() {
        let manager = SkillManager::builtin(&LocalFs);
        assert_eq!(manager.count(), 4);
        assert_eq!(manager.list_ids(), RECOMMENDED.to_vec());
        for skill in manager.get_all() {
            assert_eq!(skill.version, "1.0.0");
            assert!(!skill.description.is_empty(), "{} has no description", skill.id);
            assert!(loader::is_valid_skill(&skill.content));
        }
        assert_eq!(
            manager.get("test-planner").map(|s| s.name.as_str()),
            Some("Test Planner")
        );
    }

    #[test]
    fn test_copy_unknown_skill_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SkillManager::builtin(&LocalFs);

        let err = manager
            .copy_to_project(&["developer-guide", "ghost"], dir.path())
            .unwrap_err();

        assert!(matches!(err, AidevError::SkillNotFound { ref id } if id == "ghost"));
        assert!(!dir.path().join(SKILLS_DIR).exists());
    }

    #[test]
    fn test_validate_project_skills() {
        let dir = tempfile::tempdir().unwrap();
        let manager = SkillManager::builtin(&LocalFs);

        let check = manager.validate_project_skills(dir.path()).unwrap();
        assert!(!check.dir_exists);
        assert_eq!(check.missing.len(), 4);

        manager
            .copy_to_project(&["requirements-analyzer", "test-planner"], dir.path())
            .unwrap();
        let check = manager.validate_project_skills(dir.path()).unwrap();
        assert!(!check.is_valid());
        assert_eq!(check.missing, vec!["architecture-designer", "developer-guide"]);

        manager.copy_all_to_project(dir.path()).unwrap();
        assert!(manager.validate_project_skills(dir.path()).unwrap().is_valid());
    }

    #[test]
    fn test_load_from_directory_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("developer-guide.md"),
            "# Custom Guide\n> local override",
        )
        .unwrap();
        std::fs::write(dir.path().join("extra.md"), "# Extra").unwrap();

        let mut manager = SkillManager::builtin(&LocalFs);
        assert_eq!(manager.load_from_directory(dir.path()).unwrap(), 2);

        assert_eq!(manager.count(), 5);
        assert_eq!(manager.get("developer-guide").unwrap().name, "Custom Guide");
        assert!(manager.has("extra"));
    }
}
