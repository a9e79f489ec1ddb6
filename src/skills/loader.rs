use std::path::Path;

use super::{Skill, SkillSource};
use crate::error::{AidevError, Result};
use crate::fs::FileSystem;

const DEFAULT_VERSION: &str = "1.0.0";

/// Build a [`Skill`] from a markdown document.
///
/// Front matter between `---` fences may set `id` and `version`. The first
/// `# ` heading is the name and the first `> ` line the description. The id
/// falls back to `stem`, the name to `stem` in title case.
pub fn parse_skill(content: &str, stem: &str, source: SkillSource) -> Skill {
    let mut id = None;
    let mut version = None;
    let mut body = content;

    if let Some(rest) = content.strip_prefix("---\n") {
        if let Some(end) = rest.find("\n---") {
            for line in rest[..end].lines() {
                if let Some((key, value)) = line.split_once(':') {
                    let value = value.trim();
                    if value.is_empty() {
                        continue;
                    }
                    match key.trim() {
                        "id" => id = Some(value.to_string()),
                        "version" => version = Some(value.to_string()),
                        _ => {}
                    }
                }
            }
            body = &rest[end + 4..];
        }
    }

    let name = body
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let description = body
        .lines()
        .find_map(|line| line.strip_prefix("> "))
        .map(|s| s.trim().to_string());

    Skill {
        id: id.unwrap_or_else(|| stem.to_string()),
        name: name.unwrap_or_else(|| title_case(stem)),
        description: description.unwrap_or_default(),
        version: version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        content: content.to_string(),
        source,
    }
}

pub fn load_from_file(fs: &dyn FileSystem, path: &Path) -> Result<Skill> {
    let content = fs.read_file(path).map_err(|e| AidevError::Io {
        context: format!("reading skill {}", path.display()),
        source: e,
    })?;
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(parse_skill(
        &content,
        &stem,
        SkillSource::File(path.to_path_buf()),
    ))
}

/// Every `*.md` skill below `dir`. A missing directory yields no skills.
pub fn load_from_directory(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<Skill>> {
    let files = fs.list_files(dir).map_err(|e| AidevError::Io {
        context: format!("listing skills in {}", dir.display()),
        source: e,
    })?;

    files
        .iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .map(|path| load_from_file(fs, path))
        .collect()
}

/// A usable skill document has content and a `# ` heading.
pub fn is_valid_skill(content: &str) -> bool {
    !content.trim().is_empty() && content.lines().any(|line| line.starts_with("# "))
}

fn title_case(stem: &str) -> String {
    stem.split('-')
        .filter(|w| !w.is_empty())
        .map(crate::render::case::capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::LocalFs;

    #[test]
    fn test_parse_front_matter_and_heading() {
        let doc = "---\nid: custom-id\nversion: 2.0.0\n---\n\n# Fancy Skill\n\n> Does fancy things.\n\nBody";
        let skill = parse_skill(doc, "file-name", SkillSource::Builtin);
        assert_eq!(skill.id, "custom-id");
        assert_eq!(skill.version, "2.0.0");
        assert_eq!(skill.name, "Fancy Skill");
        assert_eq!(skill.description, "Does fancy things.");
        assert_eq!(skill.content, doc);
    }

    #[test]
    fn test_parse_fallbacks() {
        let skill = parse_skill("plain text only", "test-planner", SkillSource::Builtin);
        assert_eq!(skill.id, "test-planner");
        assert_eq!(skill.name, "Test Planner");
        assert_eq!(skill.description, "");
        assert_eq!(skill.version, "1.0.0");
    }

    #[test]
    fn test_description_needs_quote_marker() {
        let doc = "# Skill\n\n>not a quote\n\n> Real description\n";
        let skill = parse_skill(doc, "skill", SkillSource::Builtin);
        assert_eq!(skill.description, "Real description");
    }

    #[test]
    fn test_is_valid_skill() {
        assert!(is_valid_skill("# Title\nbody"));
        assert!(!is_valid_skill("   "));
        assert!(!is_valid_skill("no heading"));
    }

    #[test]
    fn test_load_from_directory_only_markdown() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("alpha.md"), "# Alpha\n> first").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/beta.md"), "# Beta").unwrap();

        let skills = load_from_directory(&LocalFs, dir.path()).unwrap();
        let ids: Vec<_> = skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "beta"]);
        assert_eq!(
            skills[0].source,
            SkillSource::File(dir.path().join("alpha.md"))
        );
    }

    #[test]
    fn test_load_from_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_directory(&LocalFs, &dir.path().join("none"))
            .unwrap()
            .is_empty());
    }
}
