use std::sync::LazyLock;

use regex::Regex;

use super::parser::{decode_lossy, DocumentFormat, ParseResult, ParsedDocument, Parser};

static INVISIBLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<head\b[^>]*>.*?</head\s*>")
        .expect("valid regex")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid regex"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]{2,8});").expect("valid regex")
});

fn decode_entity(entity: &str) -> Option<String> {
    let named = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "rsquo" => '\u{2019}',
        "lsquo" => '\u{2018}',
        "rdquo" => '\u{201d}',
        "ldquo" => '\u{201c}',
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(named.to_string())
}

/// Visible text of an HTML document, one block per line.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let visible = INVISIBLE.replace_all(html, " ");
    let stripped = TAG.replace_all(&visible, "\n");
    let decoded = ENTITY.replace_all(&stripped, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });

    decoded
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct HtmlParser;

impl HtmlParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Parser for HtmlParser {
    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::Html]
    }

    async fn parse_bytes(&self, data: &[u8], format: DocumentFormat) -> ParseResult<ParsedDocument> {
        let html = decode_lossy(data);
        Ok(ParsedDocument::new(format, html_to_text(&html)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_only() {
        let html = r#"<html><head><title>Ignored</title><style>p { color: red; }</style></head>
<body><h1>Report</h1><!-- draft --><p>The <b>World Health Organization</b> (WHO)</p>
<script>var x = "(JS)";</script><p>Second&nbsp;block &amp; more</p></body></html>"#;

        let text = html_to_text(html);

        assert_eq!(
            text,
            "Report\nThe\nWorld Health Organization\n(WHO)\nSecond block & more"
        );
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(html_to_text("caf&#233; &#x2013; &bogus;"), "café \u{2013} &bogus;");
    }

    #[tokio::test]
    async fn test_html_parser() {
        let parser = HtmlParser::new();
        let doc = parser
            .parse_bytes(b"<p>AI (Artificial Intelligence)</p>", DocumentFormat::Html)
            .await
            .unwrap();

        assert_eq!(doc.full_text, "AI (Artificial Intelligence)");
    }
}
