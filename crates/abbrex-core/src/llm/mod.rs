mod client;
mod config;
mod gemini;
mod ollama;
mod prompt;

pub use client::{ask, client_from_config, Answer, LlmClient, LlmError, LlmResult};
pub use config::{
    LlmConfig, LlmProvider, DEFAULT_GEMINI_ENDPOINT, DEFAULT_GEMINI_MODEL,
    DEFAULT_OLLAMA_ENDPOINT, DEFAULT_OLLAMA_MODEL,
};
pub use gemini::GeminiClient;
pub use ollama::OllamaClient;
pub use prompt::build_prompt;
