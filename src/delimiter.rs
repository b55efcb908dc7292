//! Delimiter splitting: partition text around every match of one pattern.
//!
//! ## How It Works
//!
//! The splitter alternates between "text before the next match" and "the
//! match itself", finishing with any trailing remainder:
//!
//! ```text
//! delimiter = " "
//!
//! "Hello big World" -> ["Hello", " ", "big", " ", "World"]
//! ```
//!
//! Delimiters are kept as pieces of their own, so concatenating every piece
//! always reconstructs the input exactly. The assembler relies on this to
//! guarantee content preservation.
//!
//! ## Delimiter Kinds
//!
//! | Kind | Matches |
//! |------|---------|
//! | Literal | an exact string (`"\n\n"`, `"\n"`, `" "`, `"<br>"`) |
//! | Literal `""` | every character boundary, i.e. one piece per character |
//! | Pattern | a regular expression (e.g. a Markdown horizontal rule) |
//! | Sentence | Unicode sentence boundaries (UAX #29) |
//!
//! Sentence boundaries are harder than they look: "Dr. Smith went to
//! Washington D.C. on Jan. 15th." is one sentence, not four. Unicode
//! segmentation handles abbreviations, decimals, and ellipses well enough
//! that a hand-rolled `". "` delimiter is not worth it.

use regex_lite::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::chunk::{Chunk, ChunkIds};
use crate::Result;

#[derive(Debug, Clone)]
enum Delimiter {
    Literal(String),
    Pattern(Regex),
    Sentence,
}

/// Stateless splitter over a single delimiter.
///
/// ## Example
///
/// ```rust
/// use cleave::{ChunkIds, DelimiterSplitter};
///
/// let splitter = DelimiterSplitter::literal(" ");
/// let pieces = splitter.split("Hello World", &mut ChunkIds::new());
/// let texts: Vec<&str> = pieces.iter().map(|p| p.text()).collect();
/// assert_eq!(texts, ["Hello", " ", "World"]);
/// ```
#[derive(Debug, Clone)]
pub struct DelimiterSplitter {
    delimiter: Delimiter,
}

impl DelimiterSplitter {
    /// Split on an exact string. An empty string splits into characters.
    #[must_use]
    pub fn literal(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: Delimiter::Literal(delimiter.into()),
        }
    }

    /// Split on every match of a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::from_regex(Regex::new(pattern)?))
    }

    pub(crate) fn from_regex(regex: Regex) -> Self {
        Self {
            delimiter: Delimiter::Pattern(regex),
        }
    }

    /// Split on Unicode sentence boundaries.
    #[must_use]
    pub fn sentence() -> Self {
        Self {
            delimiter: Delimiter::Sentence,
        }
    }

    /// Whether this splitter reduces any text to single characters.
    #[must_use]
    pub fn is_character(&self) -> bool {
        matches!(&self.delimiter, Delimiter::Literal(s) if s.is_empty())
    }

    /// Partition `content` into pieces. No piece carries metadata.
    pub fn split(&self, content: &str, ids: &mut ChunkIds) -> Vec<Chunk> {
        let parts = match &self.delimiter {
            Delimiter::Literal(literal) => partition(
                content,
                content
                    .match_indices(literal.as_str())
                    .map(|(start, m)| (start, start + m.len())),
            ),
            Delimiter::Pattern(regex) => {
                partition(content, regex.find_iter(content).map(|m| (m.start(), m.end())))
            }
            Delimiter::Sentence => content.split_sentence_bounds().collect(),
        };

        parts
            .into_iter()
            .map(|part| Chunk::plain(ids, part))
            .collect()
    }
}

/// Alternate between the gaps and the matched spans, skipping empty slices.
fn partition<I>(content: &str, matches: I) -> Vec<&str>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut parts = Vec::new();
    let mut last = 0;

    for (start, end) in matches {
        if start > last {
            parts.push(&content[last..start]);
        }
        if end > start {
            parts.push(&content[start..end]);
        }
        last = end;
    }

    if last < content.len() {
        parts.push(&content[last..]);
    }

    parts
}
