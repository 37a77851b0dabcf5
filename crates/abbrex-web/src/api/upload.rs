use std::collections::HashMap;

use axum::extract::Multipart;

use super::error::ApiError;

pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Fields of a submitted form. File parts with no filename or no bytes are
/// treated as "nothing uploaded".
#[derive(Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read multipart: {e}")))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(filename) = field.file_name().map(ToString::to_string) {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read file: {e}")))?;

                if filename.is_empty() || data.is_empty() {
                    continue;
                }

                tracing::debug!(filename = %filename, bytes = data.len(), "File data received");
                form.file = Some(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read field {name}: {e}")))?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}
