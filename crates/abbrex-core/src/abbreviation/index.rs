use std::collections::HashMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviationEntry {
    pub abbreviation: String,
    pub full_term: String,
}

impl AbbreviationEntry {
    #[must_use]
    pub fn new(abbreviation: impl Into<String>, full_term: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            full_term: full_term.into(),
        }
    }
}

/// Abbreviation to full term mapping for one document.
///
/// Keys are unique and the first insertion for a key wins. Iteration follows
/// insertion order; [`AbbreviationIndex::sorted`] gives the display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AbbreviationIndex {
    entries: Vec<AbbreviationEntry>,
    positions: HashMap<String, usize>,
}

impl AbbreviationIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the abbreviation is already present (the
    /// existing full term is kept) or the pair is malformed: a key needs a
    /// letter and no lowercase, a full term needs non-whitespace text.
    pub fn insert(&mut self, abbreviation: String, full_term: String) -> bool {
        if !is_valid_key(&abbreviation) || full_term.trim().is_empty() {
            return false;
        }
        if self.positions.contains_key(&abbreviation) {
            return false;
        }
        self.positions.insert(abbreviation.clone(), self.entries.len());
        self.entries.push(AbbreviationEntry {
            abbreviation,
            full_term,
        });
        true
    }

    #[must_use]
    pub fn get(&self, abbreviation: &str) -> Option<&str> {
        self.positions
            .get(abbreviation)
            .map(|&i| self.entries[i].full_term.as_str())
    }

    #[must_use]
    pub fn contains(&self, abbreviation: &str) -> bool {
        self.positions.contains_key(abbreviation)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AbbreviationEntry> {
        self.entries.iter()
    }

    /// Entries ordered by abbreviation.
    #[must_use]
    pub fn sorted(&self) -> Vec<&AbbreviationEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| a.abbreviation.cmp(&b.abbreviation));
        sorted
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<AbbreviationEntry> {
        self.entries
    }

    /// Tab-separated export with a header row, sorted by abbreviation.
    #[must_use]
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("abbreviation\tfull_term\n");
        for entry in self.sorted() {
            let _ = writeln!(out, "{}\t{}", entry.abbreviation, entry.full_term);
        }
        out
    }

    /// `ABBR: Full Term` lines, sorted by abbreviation.
    #[must_use]
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for entry in self.sorted() {
            let _ = writeln!(out, "{}: {}", entry.abbreviation, entry.full_term);
        }
        out
    }
}

fn is_valid_key(abbreviation: &str) -> bool {
    abbreviation.chars().any(|c| c.is_ascii_alphabetic())
        && !abbreviation.chars().any(char::is_lowercase)
}

impl Serialize for AbbreviationIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}

impl<'a> IntoIterator for &'a AbbreviationIndex {
    type Item = &'a AbbreviationEntry;
    type IntoIter = std::slice::Iter<'a, AbbreviationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, String)> for AbbreviationIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (abbreviation, full_term) in iter {
            index.insert(abbreviation, full_term);
        }
        index
    }
}
