use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use super::parser::{CompositeParser, DocumentFormat, ParseError, ParsedDocument, Parser};
use crate::abbreviation::{AbbreviationExtractor, AbbreviationIndex, ExtractorOptions};
use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionStats {
    pub characters: usize,
    pub abbreviations: usize,
    pub duration_ms: u64,
}

pub struct ExtractionOutput {
    pub document: ParsedDocument,
    pub index: AbbreviationIndex,
    pub stats: ExtractionStats,
}

/// Parses an uploaded document and runs the abbreviation extractor over it.
pub struct ExtractionPipeline {
    parser: Box<dyn Parser>,
    extractor: AbbreviationExtractor,
}

impl ExtractionPipeline {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Box::new(CompositeParser::default()),
            extractor: AbbreviationExtractor::new(),
        }
    }

    #[must_use]
    pub fn with_parser(mut self, parser: Box<dyn Parser>) -> Self {
        self.parser = parser;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ExtractorOptions) -> Self {
        self.extractor = AbbreviationExtractor::with_options(options);
        self
    }

    #[must_use]
    pub fn parser(&self) -> &dyn Parser {
        self.parser.as_ref()
    }

    /// Parses bytes whose format is inferred from `filename`.
    pub async fn parse_upload(&self, filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let format = DocumentFormat::from_filename(filename)
            .ok_or_else(|| ParseError::UnsupportedFormat(filename.to_string()))?;
        Ok(self.parser.parse_bytes(data, format).await?)
    }

    pub async fn run_upload(&self, filename: &str, data: &[u8]) -> Result<ExtractionOutput> {
        let started = Instant::now();
        let document = self.parse_upload(filename, data).await?;
        Ok(self.finish(document, started))
    }

    pub async fn run_file(&self, path: &Path) -> Result<ExtractionOutput> {
        let started = Instant::now();
        let document = self.parser.parse_file(path).await?;
        Ok(self.finish(document, started))
    }

    #[must_use]
    pub fn run_document(&self, document: ParsedDocument) -> ExtractionOutput {
        self.finish(document, Instant::now())
    }

    fn finish(&self, document: ParsedDocument, started: Instant) -> ExtractionOutput {
        let index = self.extractor.extract(&document.full_text);
        let stats = ExtractionStats {
            characters: document.full_text.chars().count(),
            abbreviations: index.len(),
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        tracing::debug!(
            format = ?document.format,
            characters = stats.characters,
            abbreviations = stats.abbreviations,
            "Extracted abbreviations"
        );

        ExtractionOutput {
            document,
            index,
            stats,
        }
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::new()
    }
}
