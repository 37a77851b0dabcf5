//! Matching a run of words against the letters of an abbreviation.

/// Words ignored when building initials.
pub(crate) const FUNCTION_WORDS: &[&str] = &[
    "of", "for", "in", "on", "at", "by", "to", "from", "with", "about", "into", "over", "under",
    "between", "through", "the", "a", "an", "is", "are", "was", "were", "be", "being", "this",
    "that", "these", "those", "as", "than", "via",
];

/// Prefixes that may contribute their own initial (`Microprocessor` -> `MP`).
const PREFIXES: &[&str] = &[
    "auto", "multi", "micro", "macro", "electro", "hyper", "hypo", "inter", "intra", "ultra",
    "super", "sub", "trans",
];

const WORD_PUNCTUATION: &[char] = &['.', ',', ';', ':', '(', ')', '[', ']', '"', '\u{201c}', '\u{201d}'];

pub(crate) fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.contains(&word)
}

pub(crate) fn strip_word_punctuation(word: &str) -> &str {
    word.trim_matches(WORD_PUNCTUATION)
}

pub(crate) fn first_alpha(s: &str) -> Option<char> {
    s.chars().find(|c| c.is_alphabetic())
}

#[derive(Debug, Clone, Copy)]
struct Mode {
    skip_function_words: bool,
    use_prefixes: bool,
}

#[derive(Debug, Default)]
struct Initials {
    letters: String,
    count: usize,
    has_and: bool,
}

impl Initials {
    fn push(&mut self, c: char) {
        self.letters.extend(c.to_uppercase());
        self.count += 1;
    }
}

fn build_initials(words: &[&str], has_amp: bool, mode: Mode) -> Initials {
    let mut initials = Initials::default();

    for word in words.iter().map(|w| strip_word_punctuation(w)).filter(|w| !w.is_empty()) {
        let lower = word.to_lowercase();

        if lower == "and" {
            if has_amp {
                initials.has_and = true;
                continue;
            }
            if mode.skip_function_words {
                continue;
            }
        }

        if mode.skip_function_words && is_function_word(&lower) {
            continue;
        }

        for part in lower.split(['-', '\u{2013}']).filter(|p| !p.is_empty()) {
            if mode.use_prefixes {
                if let Some(prefix) = PREFIXES
                    .iter()
                    .find(|prefix| part.len() > prefix.len() && part.starts_with(*prefix))
                {
                    if let Some(c) = prefix.chars().next() {
                        initials.push(c);
                    }
                    if let Some(c) = first_alpha(&part[prefix.len()..]) {
                        initials.push(c);
                    }
                    continue;
                }
            }

            if let Some(c) = first_alpha(part) {
                initials.push(c);
            }
        }
    }

    initials
}

/// The letters a phrase has to spell for one abbreviation token.
struct Target {
    letters: String,
    has_amp: bool,
    candidates: Vec<String>,
}

impl Target {
    fn new(token: &str) -> Self {
        let letters: String = token
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let mut candidates = vec![letters.clone()];
        if letters.len() >= 3 && letters.ends_with('S') {
            candidates.push(letters[..letters.len() - 1].to_string());
        }

        Self {
            letters,
            has_amp: token.contains('&'),
            candidates,
        }
    }

    fn accepts(&self, initials: &Initials) -> bool {
        if self.candidates.contains(&initials.letters) && (!self.has_amp || initials.has_and) {
            return true;
        }

        // Two letter ampersand tokens may sit at the start of a longer phrase.
        self.has_amp
            && initials.has_and
            && self.letters.len() == 2
            && initials.letters.len() > self.letters.len()
            && initials.letters.starts_with(&self.letters)
    }
}

/// Whether the initials of `words` can stand for `token`.
pub(crate) fn phrase_matches(words: &[&str], token: &str) -> bool {
    let target = Target::new(token);
    if target.letters.is_empty() {
        return false;
    }

    let base = build_initials(
        words,
        target.has_amp,
        Mode {
            skip_function_words: true,
            use_prefixes: false,
        },
    );
    if target.accepts(&base) {
        return true;
    }

    let with_function_words = build_initials(
        words,
        target.has_amp,
        Mode {
            skip_function_words: false,
            use_prefixes: false,
        },
    );
    if target.accepts(&with_function_words) {
        return true;
    }

    if base.count >= target.letters.len() {
        return false;
    }

    let with_prefixes = build_initials(
        words,
        target.has_amp,
        Mode {
            skip_function_words: true,
            use_prefixes: true,
        },
    );
    target.accepts(&with_prefixes)
}

/// Trims a phrase down to the words spelling a two letter ampersand token,
/// keeping any function words in between.
pub(crate) fn truncate_for_ampersand<'a>(words: &[&'a str], letters: &str) -> Vec<&'a str> {
    let letters: Vec<char> = letters.chars().collect();
    let mut result = Vec::new();
    let mut collected = 0;

    for &word in words {
        let core = strip_word_punctuation(word);
        let lower = core.to_lowercase();

        if core.is_empty() || lower == "and" || is_function_word(&lower) {
            result.push(word);
            continue;
        }

        let Some(first) = first_alpha(core) else {
            result.push(word);
            continue;
        };

        if collected < letters.len() && first.to_ascii_uppercase() == letters[collected] {
            result.push(word);
            collected += 1;
            if collected == letters.len() {
                break;
            }
        } else {
            break;
        }
    }

    result
}
