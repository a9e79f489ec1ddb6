use indexmap::IndexMap;

use super::{builtin, ProjectType, Template};
use crate::error::{AidevError, Result};

/// Catalog of templates keyed by id, in registration order.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: IndexMap<String, Template>,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// A registry seeded with the built-in templates.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        for template in builtin::all() {
            registry
                .templates
                .entry(template.id.clone())
                .or_insert(template);
        }
        registry
    }

    pub fn empty() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Add a template. An id that is already present is rejected and the
    /// stored template is left untouched.
    pub fn register(&mut self, template: Template) -> Result<()> {
        if self.templates.contains_key(&template.id) {
            return Err(AidevError::DuplicateTemplate { id: template.id });
        }
        self.templates.insert(template.id.clone(), template);
        Ok(())
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Template> {
        self.templates.get(id)
    }

    /// First registered template of `project_type`.
    pub fn get_by_type(&self, project_type: ProjectType) -> Option<&Template> {
        self.templates
            .values()
            .find(|t| t.project_type == project_type)
    }

    pub fn get_all(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn get_all_ids(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn has(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.templates.len()
    }

    /// Distinct project types, in order of first registration.
    pub fn list_types(&self) -> Vec<ProjectType> {
        let mut types = Vec::new();
        for template in self.templates.values() {
            if !types.contains(&template.project_type) {
                types.push(template.project_type);
            }
        }
        types
    }
}
