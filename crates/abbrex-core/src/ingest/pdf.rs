use std::io::Write;
use std::path::Path;
use std::time::Duration;

use pdf_oxide::PdfDocument;

use super::parser::{DocumentFormat, ParseError, ParseResult, ParsedDocument, Parser};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Default)]
pub struct PdfParser;

impl PdfParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn extract_pages(path: &Path) -> ParseResult<Vec<String>> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| ParseError::ParseFailed(format!("failed to parse PDF: {e}")))?;

        let page_count = doc
            .page_count()
            .map_err(|e| ParseError::ParseFailed(format!("failed to read page count: {e}")))?;

        let mut pages = Vec::with_capacity(page_count);
        for page_index in 0..page_count {
            match doc.extract_text(page_index) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    tracing::warn!(page = page_index + 1, error = %e, "Skipping unreadable PDF page");
                    pages.push(String::new());
                }
            }
        }

        Ok(pages)
    }
}

#[async_trait::async_trait]
impl Parser for PdfParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Pdf]
    }

    async fn parse_bytes(&self, data: &[u8], format: DocumentFormat) -> ParseResult<ParsedDocument> {
        let mut temp_file = tempfile::NamedTempFile::new()?;
        temp_file.write_all(data)?;
        let temp_path = temp_file.path().to_path_buf();

        let pages = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_pages(&temp_path)),
        )
        .await
        .map_err(|_| ParseError::Timeout(EXTRACTION_TIMEOUT.as_secs()))?
        .map_err(|e| ParseError::ParseFailed(format!("task join error: {e}")))??;

        drop(temp_file);

        let page_count = u32::try_from(pages.len()).unwrap_or(u32::MAX);
        tracing::debug!(page_count, "PDF text extraction complete");

        let mut text = String::new();
        for page in &pages {
            text.push_str(page);
            text.push('\n');
        }

        Ok(ParsedDocument::new(format, text).with_page_count(page_count))
    }
}
