use super::initials::is_function_word;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// At least one letter and no lowercase letters.
pub(crate) fn is_all_caps(s: &str) -> bool {
    s.chars().any(char::is_alphabetic) && !s.chars().any(char::is_lowercase)
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

fn title_case_core(core: &str, is_first: bool) -> String {
    let lower = core.to_lowercase();

    if is_all_caps(core) || core.chars().any(|c| c.is_ascii_digit()) {
        return core.to_string();
    }
    if !is_first && (lower == "and" || lower == "or" || is_function_word(&lower)) {
        return lower;
    }

    let mut out = String::with_capacity(core.len());
    let mut rest = core;
    while let Some(pos) = rest.find(['-', '\u{2013}']) {
        out.push_str(&capitalize(&rest[..pos]));
        let dash = rest[pos..].chars().next().unwrap_or('-');
        out.push(dash);
        rest = &rest[pos + dash.len_utf8()..];
    }
    out.push_str(&capitalize(rest));
    out
}

fn strip_possessive(word: &str) -> String {
    let body_end = word
        .char_indices()
        .rev()
        .find(|(_, c)| is_word_char(*c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let (body, tail) = word.split_at(body_end);

    for suffix in ["'s", "\u{2019}s"] {
        if let Some(stripped) = body.strip_suffix(suffix) {
            return format!("{stripped}{tail}");
        }
    }
    word.to_string()
}

/// Title-cases a full term for display.
///
/// Function words stay lowercase unless they open the phrase, all-caps and
/// digit-bearing words are left alone, and a possessive `'s` on the last
/// word is dropped.
#[must_use]
pub fn title_case(phrase: &str) -> String {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let last = words.len().saturating_sub(1);

    words
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let start = word.find(is_word_char).unwrap_or(word.len());
            let end = word
                .char_indices()
                .rev()
                .find(|(_, c)| is_word_char(*c))
                .map_or(start, |(idx, c)| idx + c.len_utf8());

            if start >= end {
                return (*word).to_string();
            }

            let cased = format!(
                "{}{}{}",
                &word[..start],
                title_case_core(&word[start..end], i == 0),
                &word[end..]
            );

            if i == last {
                strip_possessive(&cased)
            } else {
                cased
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
