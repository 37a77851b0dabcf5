mod casing;
mod extractor;
mod index;
mod initials;

pub use casing::title_case;
pub use extractor::{extract, AbbreviationExtractor, ExtractorOptions, MAX_TERM_WORDS};
pub use index::{AbbreviationEntry, AbbreviationIndex};
