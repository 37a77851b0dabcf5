use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use super::parser::{DocumentFormat, ParseError, ParseResult, ParsedDocument, Parser};

/// Concatenated run text of one paragraph.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

#[derive(Default)]
pub struct DocxParser;

impl DocxParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Parser for DocxParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Docx]
    }

    async fn parse_bytes(&self, data: &[u8], format: DocumentFormat) -> ParseResult<ParsedDocument> {
        let docx = read_docx(data)
            .map_err(|e| ParseError::ParseFailed(format!("failed to parse DOCX: {e:?}")))?;

        let paragraphs: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .filter(|text| !text.trim().is_empty())
            .collect();

        tracing::debug!(paragraphs = paragraphs.len(), "DOCX text extraction complete");

        Ok(ParsedDocument::new(format, paragraphs.join("\n")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run};

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }

        let mut buffer = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut buffer).unwrap();
        buffer.into_inner()
    }

    #[tokio::test]
    async fn test_paragraph_text() {
        let data = build_docx(&["Artificial Intelligence (AI)", "", "Second paragraph"]);

        let doc = DocxParser::new().parse_bytes(&data, DocumentFormat::Docx).await.unwrap();

        assert_eq!(doc.full_text, "Artificial Intelligence (AI)\nSecond paragraph");
    }

    #[tokio::test]
    async fn test_rejects_garbage() {
        let result = DocxParser::new().parse_bytes(b"PK not really", DocumentFormat::Docx).await;

        assert!(matches!(result, Err(ParseError::ParseFailed(_))));
    }
}
