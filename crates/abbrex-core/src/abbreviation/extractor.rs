use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::casing::{is_all_caps, title_case};
use super::index::AbbreviationIndex;
use super::initials::{phrase_matches, strip_word_punctuation, truncate_for_ampersand};

/// Most words a full term may span.
pub const MAX_TERM_WORDS: usize = 6;

/// How far back from an opening parenthesis to look for a long form.
const LOOKBACK_BYTES: usize = 160;

const SENTENCE_BOUNDARIES: &[char] = &['.', '!', '?', ';', ':', '(', ')', '[', ']'];

const TERM_TRIM: &[char] = &[' ', ',', '.', ';', ':', '"', '\u{201c}', '\u{201d}'];

// 2-10 characters, `&` only inside the token, then an optional plural `s`.
const TOKEN: &str = r"[A-Z0-9][A-Z0-9&]{0,8}[A-Z0-9]s?";

/// `Full Term (ABBR)`, optionally `(ABBR, qualifier)`.
static LONG_FORM_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\(\s*({TOKEN})\s*(?:[,;][^()]*)?\)")).expect("valid regex")
});

/// `ABBR (Full Term)`.
static ABBREVIATION_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({TOKEN})\s*\(([^()]+)\)")).expect("valid regex")
});

/// `4-digit IPC (IPC4)`.
static DIGIT_QUALIFIED_FIRST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b((\d+)-[a-z]+\s+([A-Z]{2,8}))\s*\(\s*([A-Z]{2,8})(\d+)\s*\)")
        .expect("valid regex")
});

static DIGIT_QUALIFIED_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,8}(\d{1,2})$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractorOptions {
    /// Title-case full terms for display.
    pub title_case: bool,
}

impl ExtractorOptions {
    /// Options used by the web form and the CLI.
    #[must_use]
    pub fn display() -> Self {
        Self { title_case: true }
    }
}

#[derive(Debug)]
struct Candidate {
    paren: usize,
    abbreviation: String,
    full_term: String,
}

/// Rule-based abbreviation extractor.
///
/// Finds `Full Term (ABBR)` and `ABBR (Full Term)` pairs. A full term is only
/// accepted when its initials spell the abbreviation, so unrelated
/// parentheticals are skipped rather than reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbbreviationExtractor {
    options: ExtractorOptions,
}

impl AbbreviationExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(options: ExtractorOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> ExtractorOptions {
        self.options
    }

    /// Builds the abbreviation index for `text`. Never fails; text without
    /// matches yields an empty index.
    #[must_use]
    pub fn extract(&self, text: &str) -> AbbreviationIndex {
        let mut candidates = Vec::new();
        candidates.extend(digit_qualified_matches(text));
        candidates.extend(long_form_first_matches(text));
        candidates.extend(abbreviation_first_matches(text));

        // Stable, so the pattern order above breaks ties on the same parenthesis.
        candidates.sort_by_key(|c| c.paren);

        let mut seen_parens = HashSet::new();
        let mut index = AbbreviationIndex::new();

        for candidate in candidates {
            if !seen_parens.insert(candidate.paren) {
                continue;
            }

            let Some((abbreviation, full_term)) =
                normalize(&candidate.abbreviation, &candidate.full_term)
            else {
                continue;
            };

            let full_term = if self.options.title_case {
                title_case(&full_term)
            } else {
                full_term
            };

            index.insert(abbreviation, full_term);
        }

        index
    }
}

/// Extracts with default options.
#[must_use]
pub fn extract(text: &str) -> AbbreviationIndex {
    AbbreviationExtractor::new().extract(text)
}

fn normalize(abbreviation: &str, full_term: &str) -> Option<(String, String)> {
    let abbreviation = abbreviation.trim().to_ascii_uppercase();
    let full_term = full_term
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(TERM_TRIM)
        .to_string();

    if !abbreviation.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if full_term.is_empty() || is_all_caps(&full_term) || full_term == abbreviation {
        return None;
    }

    Some((abbreviation, full_term))
}

fn digit_qualified_matches(text: &str) -> impl Iterator<Item = Candidate> + '_ {
    DIGIT_QUALIFIED_FIRST.captures_iter(text).filter_map(|caps| {
        let phrase = caps.get(1)?;
        let count = caps.get(2)?.as_str();
        let phrase_letters = caps.get(3)?.as_str();
        let token_letters = caps.get(4)?;
        let token_digits = caps.get(5)?.as_str();

        if phrase_letters != token_letters.as_str() || count != token_digits {
            return None;
        }

        Some(Candidate {
            paren: paren_before(text, token_letters.start())?,
            abbreviation: format!("{}{token_digits}", token_letters.as_str()),
            full_term: phrase.as_str().to_string(),
        })
    })
}

fn long_form_first_matches(text: &str) -> impl Iterator<Item = Candidate> + '_ {
    LONG_FORM_FIRST.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let token = caps.get(1)?.as_str();
        let words = preceding_words(text, whole.start());

        let start = (0..words.len())
            .filter(|&start| phrase_matches(&words[start..], token))
            .last()?;
        let mut chosen = words[start..].to_vec();

        let letters: String = token
            .strip_suffix('s')
            .unwrap_or(token)
            .chars()
            .filter(char::is_ascii_alphabetic)
            .collect();
        if token.contains('&') && letters.len() == 2 {
            chosen = truncate_for_ampersand(&chosen, &letters);
        }

        Some(Candidate {
            paren: whole.start(),
            abbreviation: token.to_string(),
            full_term: chosen.join(" "),
        })
    })
}

fn abbreviation_first_matches(text: &str) -> impl Iterator<Item = Candidate> + '_ {
    ABBREVIATION_FIRST.captures_iter(text).filter_map(|caps| {
        let token = caps.get(1)?.as_str();
        let inner = caps.get(2)?;
        let phrase = inner.as_str().trim_matches(TERM_TRIM);
        let words: Vec<&str> = phrase.split_whitespace().collect();

        if words.is_empty() || words.len() > MAX_TERM_WORDS {
            return None;
        }

        let accepted = DIGIT_QUALIFIED_TOKEN.captures(token).map_or_else(
            || phrase_matches(&words, token),
            |digits| digits.get(1).is_some_and(|d| phrase.contains(d.as_str())),
        );
        if !accepted {
            return None;
        }

        Some(Candidate {
            paren: paren_before(text, inner.start())?,
            abbreviation: token.to_string(),
            full_term: phrase.to_string(),
        })
    })
}

/// Offset of the `(` closest before `pos`.
fn paren_before(text: &str, pos: usize) -> Option<usize> {
    text[..pos].rfind('(')
}

/// Up to [`MAX_TERM_WORDS`] words directly before `paren`, stopping at the
/// nearest sentence boundary.
fn preceding_words(text: &str, paren: usize) -> Vec<&str> {
    let mut lo = paren.saturating_sub(LOOKBACK_BYTES);
    while !text.is_char_boundary(lo) {
        lo += 1;
    }

    let mut window = &text[lo..paren];
    // A window cut mid-word would contribute a bogus initial.
    if lo > 0 && !text[..lo].ends_with(char::is_whitespace) {
        window = window.find(char::is_whitespace).map_or("", |i| &window[i..]);
    }

    let fragment = window
        .rfind(SENTENCE_BOUNDARIES)
        .map_or(window, |i| &window[i + 1..]);

    let mut words: Vec<&str> = fragment
        .split_whitespace()
        .filter(|w| !strip_word_punctuation(w).is_empty())
        .rev()
        .take(MAX_TERM_WORDS)
        .collect();
    words.reverse();
    words
}
