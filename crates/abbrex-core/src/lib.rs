pub mod abbreviation;
pub mod error;
pub mod ingest;
pub mod llm;

pub use abbreviation::{
    extract, title_case, AbbreviationEntry, AbbreviationExtractor, AbbreviationIndex,
    ExtractorOptions,
};
pub use error::{Error, Result};
pub use ingest::{
    CompositeParser, DocumentFormat, ExtractionOutput, ExtractionPipeline, ExtractionStats,
    ParseError, ParsedDocument, Parser,
};
pub use llm::{ask, client_from_config, Answer, LlmClient, LlmConfig, LlmError, LlmProvider};
