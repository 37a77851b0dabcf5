use abbrex_core::{Answer, LlmProvider, client_from_config};
use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use serde::Serialize;

use super::error::ApiError;
use super::upload::UploadForm;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(ask_question))
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub answer: String,
    pub provider: LlmProvider,
    pub model: String,
}

impl From<Answer> for AskResponse {
    fn from(answer: Answer) -> Self {
        Self {
            answer: answer.text,
            provider: answer.provider,
            model: answer.model,
        }
    }
}

/// Form fields: `question`, optional `api_key`, optional `file`.
async fn ask_question(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AskResponse>, ApiError> {
    let form = UploadForm::read(multipart).await?;

    let config = state
        .config
        .llm
        .clone()
        .with_api_key(form.field("api_key").map(ToString::to_string));

    if config.provider.requires_api_key() && !config.has_api_key() {
        return Err(ApiError::bad_request(format!(
            "Please enter your {} API key.",
            provider_label(config.provider)
        )));
    }

    let Some(question) = form.field("question") else {
        return Err(ApiError::bad_request("Please enter your question."));
    };

    let context = match &form.file {
        Some(file) => {
            state
                .pipeline
                .parse_upload(&file.filename, &file.data)
                .await?
                .full_text
        }
        None => String::new(),
    };

    let client = client_from_config(&config).map_err(abbrex_core::Error::from)?;
    let answer = abbrex_core::ask(client.as_ref(), &context, question)
        .await
        .map_err(abbrex_core::Error::from)?;

    tracing::info!(
        provider = %answer.provider,
        model = %answer.model,
        context_chars = context.len(),
        "Question answered"
    );

    Ok(Json(answer.into()))
}

const fn provider_label(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::Gemini => "Gemini",
        LlmProvider::Ollama => "Ollama",
    }
}
