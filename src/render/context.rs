use std::collections::BTreeMap;

use tera::{Context, Value};

/// Flat name -> value mapping handed to every render of one application.
pub type Variables = BTreeMap<String, Value>;

pub fn build_context(variables: &Variables) -> Context {
    let mut context = Context::new();
    for (key, value) in variables {
        context.insert(key, value);
    }
    context
}
