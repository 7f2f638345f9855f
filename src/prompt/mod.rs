pub mod builder;
pub mod engine;

pub use builder::{PromptBuilder, comparison_response_schema};
pub use engine::TeraEngine;
