use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::client::{build_http_client, check_status, parse_endpoint, LlmClient, LlmError, LlmResult};
use super::config::{LlmConfig, LlmProvider};

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Client for a local Ollama server (`/api/generate`, non-streaming).
pub struct OllamaClient {
    http: Client,
    endpoint: Url,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> LlmResult<Self> {
        Ok(Self {
            http: build_http_client(config)?,
            endpoint: parse_endpoint(&config.endpoint)?,
            model: config.model.clone(),
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for OllamaClient {
    fn provider(&self) -> LlmProvider {
        LlmProvider::Ollama
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(self.endpoint.join("api/generate")?)
            .json(&body)
            .send()
            .await?;

        let response: GenerateResponse = check_status(response).await?.json().await?;
        if response.response.trim().is_empty() {
            return Err(LlmError::InvalidResponse("empty answer".into()));
        }

        Ok(response.response)
    }
}
