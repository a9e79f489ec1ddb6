use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tera::{Filter, Function, Tera, Test, Value};

use crate::error::{AidevError, Result};
use crate::render::context::{build_context, Variables};
use crate::render::helpers;

const INLINE_TEMPLATE: &str = "__template__";

/// A named helper callable from template source.
#[derive(Clone)]
pub enum Helper {
    /// `{{ value | name(arg=...) }}`
    Filter(Arc<dyn Filter>),
    /// `{{ name(arg=...) }}`
    Function(Arc<dyn Function>),
    /// `{% if value is name(...) %}`
    Test(Arc<dyn Test>),
}

impl Helper {
    fn install(&self, tera: &mut Tera, name: &str) {
        match self {
            Helper::Filter(f) => {
                let f = Arc::clone(f);
                tera.register_filter(
                    name,
                    move |value: &Value, args: &HashMap<String, Value>| f.filter(value, args),
                );
            }
            Helper::Function(f) => {
                let f = Arc::clone(f);
                tera.register_function(name, move |args: &HashMap<String, Value>| f.call(args));
            }
            Helper::Test(t) => {
                let t = Arc::clone(t);
                tera.register_tester(name, move |value: Option<&Value>, args: &[Value]| {
                    t.test(value, args)
                });
            }
        }
    }
}

/// Renders template source against a [`Variables`] bag.
///
/// Helpers and partials belong to the engine instance. Every render builds a
/// fresh `Tera` from them, so two engines never observe each other's
/// registrations and an unregistered helper is gone for the next render.
#[derive(Clone)]
pub struct TemplateEngine {
    helpers: BTreeMap<String, Helper>,
    partials: BTreeMap<String, String>,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// An engine with the built-in helper library registered.
    pub fn new() -> Self {
        let mut engine = Self::bare();
        engine.register_filter("formatDate", helpers::format_date);
        engine.register_function("currentYear", helpers::current_year);
        engine.register_filter("capitalize", helpers::capitalize);
        engine.register_filter("kebabCase", helpers::kebab_case);
        engine.register_filter("camelCase", helpers::camel_case);
        engine.register_filter("pascalCase", helpers::pascal_case);
        engine.register_test("eq", helpers::eq_test);
        engine.register_function("eq", helpers::eq_fn);
        engine.register_filter("json", helpers::json);
        engine
    }

    /// An engine with no helpers beyond what tera itself provides.
    pub fn bare() -> Self {
        Self {
            helpers: BTreeMap::new(),
            partials: BTreeMap::new(),
        }
    }

    pub fn register_filter<F: Filter + 'static>(&mut self, name: &str, filter: F) {
        self.register_helper(name, Helper::Filter(Arc::new(filter)));
    }

    pub fn register_function<F: Function + 'static>(&mut self, name: &str, function: F) {
        self.register_helper(name, Helper::Function(Arc::new(function)));
    }

    pub fn register_test<T: Test + 'static>(&mut self, name: &str, test: T) {
        self.register_helper(name, Helper::Test(Arc::new(test)));
    }

    /// Filters, functions and testers live in separate tera namespaces, so a
    /// name may be registered once per kind. Re-registering replaces.
    pub fn register_helper(&mut self, name: &str, helper: Helper) {
        self.helpers.insert(helper_key(name, &helper), helper);
    }

    /// Remove every helper registered under `name`. Returns whether any existed.
    pub fn unregister_helper(&mut self, name: &str) -> bool {
        let before = self.helpers.len();
        self.helpers.retain(|key, _| helper_name(key) != name);
        self.helpers.len() != before
    }

    pub fn has_helper(&self, name: &str) -> bool {
        self.helpers.keys().any(|key| helper_name(key) == name)
    }

    /// Register a named sub-template, included with `{% include "name" %}`.
    pub fn register_partial(&mut self, name: &str, source: &str) -> Result<()> {
        let mut scratch = Tera::default();
        scratch
            .add_raw_template(name, source)
            .map_err(|e| AidevError::PartialSyntax {
                name: name.to_string(),
                source: e,
            })?;
        self.partials.insert(name.to_string(), source.to_string());
        Ok(())
    }

    pub fn unregister_partial(&mut self, name: &str) -> bool {
        self.partials.remove(name).is_some()
    }

    pub fn has_partial(&self, name: &str) -> bool {
        self.partials.contains_key(name)
    }

    pub fn render(&self, source: &str, variables: &Variables) -> Result<String> {
        self.render_named(INLINE_TEMPLATE, source, variables)
    }

    /// Like [`render`](Self::render), but errors name the template `name`.
    pub fn render_named(&self, name: &str, source: &str, variables: &Variables) -> Result<String> {
        self.compile_named(name, source)?.render(variables)
    }

    /// Parse `source` once for repeated rendering against different bags.
    pub fn compile(&self, source: &str) -> Result<CompiledTemplate> {
        self.compile_named(INLINE_TEMPLATE, source)
    }

    pub fn compile_named(&self, name: &str, source: &str) -> Result<CompiledTemplate> {
        let render_err = |e| AidevError::RenderError {
            template: name.to_string(),
            source: e,
        };

        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        for (key, helper) in &self.helpers {
            helper.install(&mut tera, helper_name(key));
        }
        tera.add_raw_templates(self.partials.iter())
            .map_err(render_err)?;
        tera.add_raw_template(name, source).map_err(render_err)?;

        Ok(CompiledTemplate {
            tera,
            name: name.to_string(),
        })
    }

    /// Render several sources, stopping at the first failure.
    pub fn render_batch(&self, items: &[(&str, &Variables)]) -> Result<Vec<String>> {
        items
            .iter()
            .map(|(source, variables)| self.render(source, variables))
            .collect()
    }
}

/// A parsed template bound to the helpers and partials it was compiled with.
pub struct CompiledTemplate {
    tera: Tera,
    name: String,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn render(&self, variables: &Variables) -> Result<String> {
        let context = build_context(variables);
        self.tera
            .render(&self.name, &context)
            .map_err(|e| AidevError::RenderError {
                template: self.name.clone(),
                source: e,
            })
    }
}

fn helper_key(name: &str, helper: &Helper) -> String {
    let kind = match helper {
        Helper::Filter(_) => "filter",
        Helper::Function(_) => "function",
        Helper::Test(_) => "test",
    };
    format!("{name}\u{0}{kind}")
}

fn helper_name(key: &str) -> &str {
    key.split('\u{0}').next().unwrap_or(key)
}
