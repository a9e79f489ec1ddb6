pub mod applicator;
pub mod diff;
pub mod file;
pub mod variables;

pub use applicator::{ApplyReport, PreviewFile, TemplateApplicator, TemplatePreview, INPUTS_DIR};
pub use file::{FileGenerator, GenerateResult};
pub use variables::{prepare_variables, prepare_variables_at, ProjectMetadata};
