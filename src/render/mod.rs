pub mod case;
pub mod context;
pub mod engine;
pub mod helpers;

pub use context::{build_context, Variables};
pub use engine::{CompiledTemplate, Helper, TemplateEngine};
