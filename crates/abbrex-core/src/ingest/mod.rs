mod docx;
mod html;
mod parser;
mod pdf;
mod pipeline;

pub use docx::DocxParser;
pub use html::{html_to_text, HtmlParser};
pub use parser::{
    CompositeParser, DocumentFormat, ParseError, ParseResult, ParsedDocument, Parser,
    PlainTextParser,
};
pub use pdf::PdfParser;
pub use pipeline::{ExtractionOutput, ExtractionPipeline, ExtractionStats};
