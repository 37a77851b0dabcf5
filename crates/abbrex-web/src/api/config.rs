use abbrex_core::{DocumentFormat, LlmProvider};
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};
use serde::Serialize;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_config))
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub provider: LlmProvider,
    pub model: String,
    /// The form has to ask for a key
    pub requires_api_key: bool,
    pub formats: Vec<&'static str>,
}

async fn get_config(State(state): State<AppState>) -> impl IntoResponse {
    let llm = &state.config.llm;

    Json(ConfigResponse {
        provider: llm.provider,
        model: llm.model.clone(),
        requires_api_key: llm.provider.requires_api_key() && !llm.has_api_key(),
        formats: DocumentFormat::ALL.iter().map(|f| f.extension()).collect(),
    })
}
