use std::sync::Arc;

use abbrex_core::{ExtractionPipeline, ExtractorOptions};

use crate::config::ServerConfig;

/// Shared across handlers. Holds no per-upload data; every request parses
/// and extracts from scratch.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub pipeline: Arc<ExtractionPipeline>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let options = ExtractorOptions {
            title_case: config.title_case,
        };

        Self {
            config: Arc::new(config),
            pipeline: Arc::new(ExtractionPipeline::new().with_options(options)),
        }
    }
}
