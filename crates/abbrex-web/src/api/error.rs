use abbrex_core::{Error, ParseError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Parse(ParseError::UnsupportedFormat(format)) => Self::new(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported file type: {format}. Upload a txt, pdf, docx or html file."),
            ),
            Error::Parse(e) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Could not read the document: {e}"),
            ),
            Error::Llm(e) => Self::new(
                StatusCode::BAD_GATEWAY,
                format!("Error while calling the LLM API: {e}"),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::warn!(status = %self.status, "{}", self.message);
        }

        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}
