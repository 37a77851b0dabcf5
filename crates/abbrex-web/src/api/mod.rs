mod abbreviations;
mod ask;
mod config;
mod error;
mod upload;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/abbreviations", abbreviations::router())
        .nest("/ask", ask::router())
        .nest("/config", config::router())
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;

    use crate::config::ServerConfig;
    use crate::state::AppState;

    pub const BOUNDARY: &str = "abbrex-test-boundary";

    pub fn test_app() -> Router {
        test_app_with(ServerConfig::default())
    }

    pub fn test_app_with(config: ServerConfig) -> Router {
        crate::build_router(AppState::new(config))
    }

    /// Hand-built `multipart/form-data` body with text fields and at most one
    /// file part named `file`.
    pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str)>) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        if let Some((filename, content)) = file {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }
}
