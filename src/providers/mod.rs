pub mod gemini;
pub mod gemini_types;
pub mod http_client;

pub use gemini::GeminiClient;
pub use gemini_types::{GenerateContentRequest, GenerateContentResponse};
