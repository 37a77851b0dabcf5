use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Parse failed: {0}")]
    ParseFailed(String),
    #[error("Parsing timed out after {0} seconds")]
    Timeout(u64),
}

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    PlainText,
    Html,
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub const ALL: [Self; 4] = [Self::PlainText, Self::Pdf, Self::Docx, Self::Html];

    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "html" | "htm" => Some(Self::Html),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_filename(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or(mime).trim();
        match essence {
            "text/plain" => Some(Self::PlainText),
            "text/html" | "application/xhtml+xml" => Some(Self::Html),
            "application/pdf" => Some(Self::Pdf),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Html => "html",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub format: DocumentFormat,
    pub full_text: String,
    pub page_count: Option<u32>,
}

impl ParsedDocument {
    #[must_use]
    pub fn new(format: DocumentFormat, full_text: String) -> Self {
        Self {
            format,
            full_text,
            page_count: None,
        }
    }

    #[must_use]
    pub fn with_page_count(mut self, count: u32) -> Self {
        self.page_count = Some(count);
        self
    }

    /// True when the document has no readable text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.full_text.trim().is_empty()
    }
}

#[async_trait::async_trait]
pub trait Parser: Send + Sync {
    fn supported_formats(&self) -> &[DocumentFormat];

    fn can_parse(&self, format: DocumentFormat) -> bool {
        self.supported_formats().contains(&format)
    }

    async fn parse_bytes(&self, data: &[u8], format: DocumentFormat) -> ParseResult<ParsedDocument>;

    async fn parse_file(&self, path: &Path) -> ParseResult<ParsedDocument> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ParseError::UnsupportedFormat("no extension".into()))?;

        let format = DocumentFormat::from_extension(ext)
            .ok_or_else(|| ParseError::UnsupportedFormat(ext.into()))?;

        if !self.can_parse(format) {
            return Err(ParseError::UnsupportedFormat(format!("{format:?}")));
        }

        let data = tokio::fs::read(path).await?;
        self.parse_bytes(&data, format).await
    }
}

/// Decodes UTF-8, dropping invalid byte sequences.
pub(crate) fn decode_lossy(data: &[u8]) -> String {
    match std::str::from_utf8(data) {
        Ok(text) => text.to_string(),
        Err(_) => String::from_utf8_lossy(data).replace('\u{FFFD}', ""),
    }
}

pub struct PlainTextParser;

impl PlainTextParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextParser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Parser for PlainTextParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::PlainText]
    }

    async fn parse_bytes(&self, data: &[u8], format: DocumentFormat) -> ParseResult<ParsedDocument> {
        let text = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
        Ok(ParsedDocument::new(format, decode_lossy(text)))
    }
}

pub struct CompositeParser {
    parsers: Vec<Box<dyn Parser>>,
}

impl CompositeParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parsers.push(parser);
        self
    }

    pub fn add_parser(&mut self, parser: Box<dyn Parser>) {
        self.parsers.push(parser);
    }

    fn find_parser(&self, format: DocumentFormat) -> Option<&dyn Parser> {
        self.parsers.iter().find(|p| p.can_parse(format)).map(AsRef::as_ref)
    }
}

impl Default for CompositeParser {
    fn default() -> Self {
        Self::new()
            .with_parser(Box::new(PlainTextParser::new()))
            .with_parser(Box::new(super::html::HtmlParser::new()))
            .with_parser(Box::new(super::pdf::PdfParser::new()))
            .with_parser(Box::new(super::docx::DocxParser::new()))
    }
}

#[async_trait::async_trait]
impl Parser for CompositeParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &DocumentFormat::ALL
    }

    fn can_parse(&self, format: DocumentFormat) -> bool {
        self.find_parser(format).is_some()
    }

    async fn parse_bytes(&self, data: &[u8], format: DocumentFormat) -> ParseResult<ParsedDocument> {
        let parser = self
            .find_parser(format)
            .ok_or_else(|| ParseError::UnsupportedFormat(format!("{format:?}")))?;

        let document = parser.parse_bytes(data, format).await?;
        tracing::debug!(
            ?format,
            bytes = data.len(),
            chars = document.full_text.len(),
            "Parsed document"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_parser() {
        let parser = PlainTextParser::new();
        let data = b"Hello, world!";

        let doc = parser.parse_bytes(data, DocumentFormat::PlainText).await.unwrap();

        assert_eq!(doc.full_text, "Hello, world!");
        assert_eq!(doc.format, DocumentFormat::PlainText);
    }

    #[tokio::test]
    async fn test_plain_text_drops_invalid_bytes() {
        let parser = PlainTextParser::new();
        let data = b"\xEF\xBB\xBFcaf\xff\xfe AI";

        let doc = parser.parse_bytes(data, DocumentFormat::PlainText).await.unwrap();

        assert_eq!(doc.full_text, "caf AI");
    }

    #[tokio::test]
    async fn test_parse_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.TXT");
        std::fs::write(&path, "Artificial Intelligence (AI)").unwrap();

        let doc = CompositeParser::default().parse_file(&path).await.unwrap();

        assert_eq!(doc.full_text, "Artificial Intelligence (AI)");
    }

    #[tokio::test]
    async fn test_parse_file_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.xlsx");
        std::fs::write(&path, "x").unwrap();

        let err = CompositeParser::default().parse_file(&path).await.unwrap_err();

        assert!(matches!(err, ParseError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[tokio::test]
    async fn test_composite_without_parser_for_format() {
        let parser = CompositeParser::new().with_parser(Box::new(PlainTextParser::new()));

        assert!(parser.can_parse(DocumentFormat::PlainText));
        assert!(!parser.can_parse(DocumentFormat::Pdf));
        assert!(parser.parse_bytes(b"%PDF", DocumentFormat::Pdf).await.is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_extension("pdf"), Some(DocumentFormat::Pdf));
        assert_eq!(DocumentFormat::from_extension("HTM"), Some(DocumentFormat::Html));
        assert_eq!(DocumentFormat::from_extension("md"), None);
        assert_eq!(DocumentFormat::from_filename("report.docx"), Some(DocumentFormat::Docx));
        assert_eq!(DocumentFormat::from_filename("README"), None);
    }

    #[test]
    fn test_format_from_mime() {
        assert_eq!(
            DocumentFormat::from_mime("application/pdf"),
            Some(DocumentFormat::Pdf)
        );
        assert_eq!(
            DocumentFormat::from_mime("text/html; charset=utf-8"),
            Some(DocumentFormat::Html)
        );
        assert_eq!(DocumentFormat::from_mime("image/png"), None);
    }
}
