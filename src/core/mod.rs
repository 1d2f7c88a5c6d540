// Public modules
pub mod clone;
pub mod error;
pub mod format;
pub mod json;
pub mod trim;
pub mod value;

// Configuration
pub mod defaults;
pub(crate) mod paths;

// Re-export common types for convenience
pub use clone::{deep_clone, DeepClone};
pub use error::{Error, ErrorCode, Result};
pub use format::{FormatArgs, Occurrences, TemplateFormatter};
pub use trim::PatternTrimmer;
pub use value::Value;
