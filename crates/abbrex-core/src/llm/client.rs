use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use super::config::{LlmConfig, LlmProvider};
use super::gemini::GeminiClient;
use super::ollama::OllamaClient;
use super::prompt::build_prompt;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Missing API key for {0}")]
    MissingApiKey(LlmProvider),
    #[error("Question is empty")]
    EmptyQuestion,
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type LlmResult<T> = Result<T, LlmError>;

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> LlmProvider;

    fn model(&self) -> &str;

    /// Sends one prompt and returns the model's text answer.
    async fn complete(&self, prompt: &str) -> LlmResult<String>;
}

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub text: String,
    pub provider: LlmProvider,
    pub model: String,
}

/// Answers `question` using `context` (the uploaded document's text, possibly
/// empty).
pub async fn ask(client: &dyn LlmClient, context: &str, question: &str) -> LlmResult<Answer> {
    let question = question.trim();
    if question.is_empty() {
        return Err(LlmError::EmptyQuestion);
    }

    let prompt = build_prompt(context, question);
    tracing::debug!(
        provider = %client.provider(),
        model = client.model(),
        prompt_chars = prompt.len(),
        "Sending question to LLM"
    );

    let text = client.complete(&prompt).await?;

    Ok(Answer {
        text,
        provider: client.provider(),
        model: client.model().to_string(),
    })
}

pub fn client_from_config(config: &LlmConfig) -> LlmResult<Box<dyn LlmClient>> {
    let client: Box<dyn LlmClient> = match config.provider {
        LlmProvider::Gemini => Box::new(GeminiClient::new(config)?),
        LlmProvider::Ollama => Box::new(OllamaClient::new(config)?),
    };
    Ok(client)
}

pub(crate) fn build_http_client(config: &LlmConfig) -> LlmResult<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
        .timeout(Duration::from_secs(u64::from(config.request_timeout_seconds)))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(LlmError::Http)
}

/// Parses an endpoint as a base URL that relative paths can be joined onto.
pub(crate) fn parse_endpoint(endpoint: &str) -> LlmResult<Url> {
    let mut endpoint = endpoint.trim().to_string();
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    Ok(Url::parse(&endpoint)?)
}

/// Turns non-success responses into [`LlmError::Api`], pulling the message
/// out of a JSON error body when there is one.
pub(crate) async fn check_status(response: Response) -> LlmResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::Api {
        status: status.as_u16(),
        message: error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        }),
    })
}

fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;
    error
        .get("message")
        .and_then(serde_json::Value::as_str)
        .or_else(|| error.as_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CannedClient;

    #[async_trait::async_trait]
    impl LlmClient for CannedClient {
        fn provider(&self) -> LlmProvider {
            LlmProvider::Ollama
        }

        fn model(&self) -> &str {
            "canned"
        }

        async fn complete(&self, prompt: &str) -> LlmResult<String> {
            Ok(format!("{} chars", prompt.len()))
        }
    }

    #[tokio::test]
    async fn test_ask_builds_answer() {
        let answer = ask(&CannedClient, "", "  What is AI?  ").await.unwrap();

        assert_eq!(answer.provider, LlmProvider::Ollama);
        assert_eq!(answer.model, "canned");
        assert_eq!(answer.text, format!("{} chars", build_prompt("", "What is AI?").len()));
    }

    #[tokio::test]
    async fn test_ask_rejects_blank_question() {
        let result = ask(&CannedClient, "context", "   ").await;
        assert!(matches!(result, Err(LlmError::EmptyQuestion)));
    }

    #[test]
    fn test_gemini_requires_key() {
        let result = client_from_config(&LlmConfig::for_provider(LlmProvider::Gemini));
        assert!(matches!(result, Err(LlmError::MissingApiKey(LlmProvider::Gemini))));
    }

    #[test]
    fn test_ollama_without_key() {
        let client = client_from_config(&LlmConfig::for_provider(LlmProvider::Ollama)).unwrap();
        assert_eq!(client.provider(), LlmProvider::Ollama);
        assert_eq!(client.model(), "llama3.2");
    }

    #[test]
    fn test_parse_endpoint_adds_slash() {
        let url = parse_endpoint("http://localhost:8080/proxy").unwrap();
        assert_eq!(url.join("api/generate").unwrap().as_str(), "http://localhost:8080/proxy/api/generate");
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(
            error_message(r#"{"error":{"code":400,"message":"API key not valid"}}"#),
            Some("API key not valid".to_string())
        );
        assert_eq!(
            error_message(r#"{"error":"model 'x' not found"}"#),
            Some("model 'x' not found".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }
}
