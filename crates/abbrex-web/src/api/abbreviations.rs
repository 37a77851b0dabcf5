use abbrex_core::{AbbreviationEntry, DocumentFormat, ExtractionOutput};
use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde::Serialize;

use super::error::ApiError;
use super::upload::UploadForm;
use crate::state::AppState;

pub const NO_TEXT_MESSAGE: &str = "No document was uploaded or no readable text was found, \
                                   so abbreviations cannot be extracted.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(extract_abbreviations))
        .route("/download", post(download_abbreviations))
}

#[derive(Debug, Serialize)]
pub struct AbbreviationsResponse {
    pub filename: String,
    pub format: DocumentFormat,
    pub count: usize,
    /// Sorted by abbreviation
    pub entries: Vec<AbbreviationEntry>,
}

async fn run_extraction(state: &AppState, multipart: Multipart) -> Result<(String, ExtractionOutput), ApiError> {
    let form = UploadForm::read(multipart).await?;
    let file = form
        .file
        .ok_or_else(|| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, NO_TEXT_MESSAGE))?;

    let output = state.pipeline.run_upload(&file.filename, &file.data).await?;
    if output.document.is_blank() {
        return Err(ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, NO_TEXT_MESSAGE));
    }

    tracing::info!(
        filename = %file.filename,
        abbreviations = output.stats.abbreviations,
        duration_ms = output.stats.duration_ms,
        "Abbreviations extracted"
    );

    Ok((file.filename, output))
}

async fn extract_abbreviations(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AbbreviationsResponse>, ApiError> {
    let (filename, output) = run_extraction(&state, multipart).await?;

    let entries: Vec<AbbreviationEntry> = output.index.sorted().into_iter().cloned().collect();

    Ok(Json(AbbreviationsResponse {
        filename,
        format: output.document.format,
        count: entries.len(),
        entries,
    }))
}

async fn download_abbreviations(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let (_, output) = run_extraction(&state, multipart).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/tab-separated-values; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"abbreviations.tsv\"",
            ),
        ],
        output.index.to_tsv(),
    ))
}
