use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::{Skill, SKILLS_DIR};
use crate::error::{AidevError, Result};
use crate::fs::{CopyOptions, FileSystem};

#[derive(Debug)]
pub struct CopyResult {
    pub skill_id: String,
    pub error: Option<AidevError>,
}

impl CopyResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Default)]
pub struct CopyReport {
    pub results: Vec<CopyResult>,
}

impl CopyReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed_skills(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.is_success())
            .map(|r| r.skill_id.as_str())
            .collect()
    }
}

/// Writes skill documents into a project's `.claude/skills/`.
pub struct SkillCopier<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> SkillCopier<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    pub fn copy_skills(&self, skills: &[&Skill], project: &Path) -> Result<Vec<PathBuf>> {
        let dir = self.prepare_dir(project)?;
        skills
            .iter()
            .map(|skill| self.copy_skill(skill, &dir))
            .collect()
    }

    /// Copy every skill, recording failures per skill instead of stopping.
    pub fn copy_with_report(&self, skills: &[&Skill], project: &Path) -> Result<CopyReport> {
        let dir = self.prepare_dir(project)?;
        let results = skills
            .iter()
            .map(|skill| CopyResult {
                skill_id: skill.id.clone(),
                error: self.copy_skill(skill, &dir).err(),
            })
            .collect();
        Ok(CopyReport { results })
    }

    pub fn copy_skill(&self, skill: &Skill, skills_dir: &Path) -> Result<PathBuf> {
        let path = skills_dir.join(skill.file_name());
        self.fs
            .write_file(&path, &skill.content)
            .map_err(|e| AidevError::Io {
                context: format!("copying skill {}", skill.id),
                source: e,
            })?;
        Ok(path)
    }

    /// File names under `.claude/skills/` that copying `skills` would replace.
    pub fn overwrite_list(&self, skills: &[&Skill], project: &Path) -> Vec<String> {
        let dir = project.join(SKILLS_DIR);
        skills
            .iter()
            .map(|skill| skill.file_name())
            .filter(|name| self.fs.exists(&dir.join(name)))
            .collect()
    }

    /// Copy `.claude/skills/` to a timestamped sibling and return its path.
    /// Nothing is copied when the project has no skills directory.
    pub fn backup(&self, project: &Path, now: DateTime<Utc>) -> Result<Option<PathBuf>> {
        let dir = project.join(SKILLS_DIR);
        if !self.fs.exists(&dir) {
            return Ok(None);
        }

        let stamp = now.format("%Y-%m-%dT%H-%M-%S-%3fZ");
        let backup = project.join(".claude").join(format!("skills-backup-{stamp}"));
        let options = CopyOptions {
            overwrite: true,
            preserve_timestamps: true,
        };
        self.fs
            .copy(&dir, &backup, options)
            .map_err(|e| AidevError::Io {
                context: format!("backing up {}", dir.display()),
                source: e,
            })?;
        Ok(Some(backup))
    }

    fn prepare_dir(&self, project: &Path) -> Result<PathBuf> {
        let dir = project.join(SKILLS_DIR);
        self.fs
            .ensure_dir(&dir)
            .map_err(|e| AidevError::DirectoryCreation {
                path: dir.clone(),
                source: e,
            })?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;
    use crate::skills::{loader::parse_skill, SkillSource};
    use chrono::TimeZone;

    fn skill(id: &str) -> Skill {
        parse_skill(&format!("# {id}\n"), id, SkillSource::Builtin)
    }

    #[test]
    fn test_copy_and_overwrite_list() {
        let dir = tempfile::tempdir().unwrap();
        let copier = SkillCopier::new(&LocalFs);
        let a = skill("a");
        let b = skill("b");

        assert!(copier.overwrite_list(&[&a, &b], dir.path()).is_empty());
        copier.copy_skills(&[&a], dir.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(dir.path().join(".claude/skills/a.md")).unwrap(),
            "# a\n"
        );
        assert_eq!(copier.overwrite_list(&[&a, &b], dir.path()), vec!["a.md"]);
    }

    #[test]
    fn test_copy_with_report() {
        let dir = tempfile::tempdir().unwrap();
        let copier = SkillCopier::new(&LocalFs);
        let a = skill("a");
        let b = skill("b");

        let report = copier.copy_with_report(&[&a, &b], dir.path()).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded(), 2);
        assert!(report.failed_skills().is_empty());
    }

    #[test]
    fn test_backup_copies_existing_skills() {
        let dir = tempfile::tempdir().unwrap();
        let copier = SkillCopier::new(&LocalFs);
        let now = Utc.with_ymd_and_hms(2025, 12, 12, 8, 30, 0).unwrap();

        assert!(copier.backup(dir.path(), now).unwrap().is_none());

        copier.copy_skills(&[&skill("a")], dir.path()).unwrap();
        let backup = copier.backup(dir.path(), now).unwrap().unwrap();
        assert!(backup.ends_with("skills-backup-2025-12-12T08-30-00-000Z"));
        assert!(backup.join("a.md").exists());
        assert!(dir.path().join(SKILLS_DIR).join("a.md").exists());
    }
}
