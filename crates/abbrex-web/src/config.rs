use abbrex_core::LlmConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8501;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the HTML form
    pub static_dir: String,

    /// Title-case full terms in extraction results
    #[serde(default = "default_true")]
    pub title_case: bool,

    #[serde(default = "default_max_upload")]
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub llm: LlmConfig,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

const fn default_true() -> bool {
    true
}

const fn default_max_upload() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
            title_case: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            llm: LlmConfig::default(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: std::env::var("ABBREX_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: std::env::var("ABBREX_STATIC").unwrap_or(defaults.static_dir),
            title_case: std::env::var("ABBREX_TITLE_CASE")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.title_case),
            max_upload_bytes: std::env::var("ABBREX_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
            llm: LlmConfig::from_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8501);
        assert!(config.title_case);
        assert!(config.static_dir.ends_with("/static"));
    }
}
