use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OLLAMA_ENDPOINT: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Which LLM service answers questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProvider {
    /// Google Gemini, hosted
    #[default]
    Gemini,
    /// Ollama-compatible server running an open model locally
    Ollama,
}

impl LlmProvider {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
        }
    }

    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_MODEL,
            Self::Ollama => DEFAULT_OLLAMA_MODEL,
        }
    }

    #[must_use]
    pub const fn default_endpoint(self) -> &'static str {
        match self {
            Self::Gemini => DEFAULT_GEMINI_ENDPOINT,
            Self::Ollama => DEFAULT_OLLAMA_ENDPOINT,
        }
    }

    #[must_use]
    pub const fn requires_api_key(self) -> bool {
        matches!(self, Self::Gemini)
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "ollama" | "local" => Ok(Self::Ollama),
            other => Err(format!("unknown LLM provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    /// Never serialized; keys are supplied at runtime.
    #[serde(skip)]
    pub api_key: Option<String>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u32,
}

const fn default_connect_timeout() -> u32 {
    10
}

const fn default_request_timeout() -> u32 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::for_provider(LlmProvider::default())
    }
}

impl LlmConfig {
    #[must_use]
    pub fn for_provider(provider: LlmProvider) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            endpoint: provider.default_endpoint().to_string(),
            api_key: None,
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: default_request_timeout(),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the config from a variable lookup. Unknown or empty values
    /// fall back to the provider defaults.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let provider = get("ABBREX_LLM_PROVIDER")
            .and_then(|v| {
                v.parse::<LlmProvider>()
                    .map_err(|e| tracing::warn!("{e}, using default"))
                    .ok()
            })
            .unwrap_or_default();

        let mut config = Self::for_provider(provider);

        if let Some(model) = get("ABBREX_LLM_MODEL") {
            config.model = model;
        }
        if let Some(endpoint) = get("ABBREX_LLM_ENDPOINT") {
            config.endpoint = endpoint;
        }
        config.api_key = get("ABBREX_LLM_API_KEY").or_else(|| get("GEMINI_API_KEY"));
        if let Some(secs) = get("ABBREX_LLM_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            config.request_timeout_seconds = secs;
        }

        config
    }

    /// Replaces the API key when `key` is non-empty.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LlmConfig::from_vars(vars(&[]));

        assert_eq!(config.provider, LlmProvider::Gemini);
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.endpoint, DEFAULT_GEMINI_ENDPOINT);
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_ollama_from_env() {
        let config = LlmConfig::from_vars(vars(&[
            ("ABBREX_LLM_PROVIDER", "ollama"),
            ("ABBREX_LLM_MODEL", "mistral"),
            ("ABBREX_LLM_TIMEOUT_SECS", "30"),
        ]));

        assert_eq!(config.provider, LlmProvider::Ollama);
        assert_eq!(config.model, "mistral");
        assert_eq!(config.endpoint, DEFAULT_OLLAMA_ENDPOINT);
        assert_eq!(config.request_timeout_seconds, 30);
    }

    #[test]
    fn test_unknown_provider_falls_back() {
        let config = LlmConfig::from_vars(vars(&[("ABBREX_LLM_PROVIDER", "watson")]));
        assert_eq!(config.provider, LlmProvider::Gemini);
    }

    #[test]
    fn test_api_key_override() {
        let config = LlmConfig::from_vars(vars(&[("GEMINI_API_KEY", "env-key")]));
        assert_eq!(config.api_key.as_deref(), Some("env-key"));

        let config = config.with_api_key(Some("  ".into()));
        assert_eq!(config.api_key.as_deref(), Some("env-key"));

        let config = config.with_api_key(Some("form-key".into()));
        assert_eq!(config.api_key.as_deref(), Some("form-key"));
    }

    #[test]
    fn test_api_key_not_serialized() {
        let config = LlmConfig::default().with_api_key(Some("secret".into()));
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!("Gemini".parse::<LlmProvider>(), Ok(LlmProvider::Gemini));
        assert_eq!("local".parse::<LlmProvider>(), Ok(LlmProvider::Ollama));
        assert!("gpt".parse::<LlmProvider>().is_err());
    }
}
