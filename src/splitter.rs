//! The closed set of splitters and the cascade that orders them.
//!
//! ## Cascades
//!
//! A cascade lists splitters from most to least structural:
//!
//! ```text
//! [h1, h2, ..., h6, code block, horizontal rule, "\n\n", "\n", sentence, " ", ""]
//! ```
//!
//! The assembler splits with the first entry and only reaches for the next
//! one when a piece is still too large. Because every cascade ends in the
//! character splitter, any piece can eventually be reduced to pieces of
//! length 1, which fit any budget. [`Cascade::new`] enforces that ending.

use crate::chunk::{Chunk, ChunkIds};
use crate::code_block::CodeBlockSplitter;
use crate::delimiter::DelimiterSplitter;
use crate::header::HeaderSplitter;
use crate::tag::TagSplitter;
use crate::Result;

/// Matches a Markdown thematic break (`---`, `***`, `___`) on its own line.
const HORIZONTAL_RULE: &str = r"\n(?:-{3,}|\*{3,}|_{3,})[ \t]*\n";

/// One way of partitioning text into pieces.
///
/// Splitters are pure: any state (such as the latest header) lives only for
/// the duration of one [`Splitter::split`] call.
#[derive(Debug, Clone)]
pub enum Splitter {
    /// Literal, regex, or sentence delimiter.
    Delimiter(DelimiterSplitter),
    /// Paired open/close tag.
    Tag(TagSplitter),
    /// Markdown `#` header of one level.
    Header(HeaderSplitter),
    /// Fenced code block.
    CodeBlock(CodeBlockSplitter),
}

impl Splitter {
    /// Partition `content` into pieces whose texts concatenate back to `content`.
    ///
    /// # Errors
    ///
    /// Only tag splitters fail, with [`crate::Error::UnterminatedTag`].
    pub fn split(&self, content: &str, ids: &mut ChunkIds) -> Result<Vec<Chunk>> {
        match self {
            Self::Delimiter(splitter) => Ok(splitter.split(content, ids)),
            Self::Tag(splitter) => splitter.split(content, ids),
            Self::Header(splitter) => Ok(splitter.split(content, ids)),
            Self::CodeBlock(splitter) => Ok(splitter.split(content, ids)),
        }
    }

    /// Whether this splitter reduces text to single characters.
    #[must_use]
    pub fn is_character(&self) -> bool {
        matches!(self, Self::Delimiter(splitter) if splitter.is_character())
    }

    /// One piece per character.
    #[must_use]
    pub fn character() -> Self {
        Self::literal("")
    }

    /// Split on single spaces.
    #[must_use]
    pub fn word() -> Self {
        Self::literal(" ")
    }

    /// Split on Unicode sentence boundaries.
    #[must_use]
    pub fn sentence() -> Self {
        Self::Delimiter(DelimiterSplitter::sentence())
    }

    /// Split on newlines.
    #[must_use]
    pub fn line() -> Self {
        Self::literal("\n")
    }

    /// Split on blank lines.
    #[must_use]
    pub fn paragraph() -> Self {
        Self::literal("\n\n")
    }

    /// Split on an exact string.
    #[must_use]
    pub fn literal(delimiter: impl Into<String>) -> Self {
        Self::Delimiter(DelimiterSplitter::literal(delimiter))
    }

    /// Split on a regular expression.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPattern`] if the pattern does not compile.
    pub fn pattern(pattern: &str) -> Result<Self> {
        DelimiterSplitter::pattern(pattern).map(Self::Delimiter)
    }

    /// Split on Markdown horizontal rules.
    #[must_use]
    pub fn horizontal_rule() -> Self {
        let regex = regex_lite::Regex::new(HORIZONTAL_RULE).expect("valid horizontal rule pattern");
        Self::Delimiter(DelimiterSplitter::from_regex(regex))
    }

    /// Split on Markdown headers of `level`.
    #[must_use]
    pub fn markdown_header(level: u8) -> Self {
        Self::Header(HeaderSplitter::new(level))
    }

    /// Split on fenced code blocks.
    #[must_use]
    pub fn code_block() -> Self {
        Self::CodeBlock(CodeBlockSplitter::new())
    }

    /// Split on `<hN>` tags, recording the header text.
    #[must_use]
    pub fn html_header(level: u8) -> Self {
        Self::Tag(TagSplitter::html_header(level))
    }

    /// Split on `<p>` tags.
    #[must_use]
    pub fn html_paragraph() -> Self {
        Self::Tag(TagSplitter::html_paragraph())
    }

    /// Split on an arbitrary paired tag.
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self::Tag(TagSplitter::new(name))
    }
}

/// An ordered list of splitters, always ending at character granularity.
///
/// ```rust
/// use cleave::{Cascade, Splitter};
///
/// let cascade = Cascade::new(vec![Splitter::paragraph(), Splitter::word()]);
/// assert_eq!(cascade.len(), 3);
/// assert!(cascade.splitters().last().unwrap().is_character());
/// ```
#[derive(Debug, Clone)]
pub struct Cascade {
    splitters: Vec<Splitter>,
}

impl Cascade {
    /// Build a cascade, appending a character splitter if `splitters` does
    /// not already end with one.
    #[must_use]
    pub fn new(mut splitters: Vec<Splitter>) -> Self {
        if !splitters.last().is_some_and(Splitter::is_character) {
            splitters.push(Splitter::character());
        }
        Self { splitters }
    }

    /// The splitters, most structural first.
    #[must_use]
    pub fn splitters(&self) -> &[Splitter] {
        &self.splitters
    }

    /// Number of splitters, including the trailing character splitter.
    #[must_use]
    pub fn len(&self) -> usize {
        self.splitters.len()
    }

    /// Always false: a cascade holds at least the character splitter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.splitters.is_empty()
    }
}

impl FromIterator<Splitter> for Cascade {
    fn from_iter<I: IntoIterator<Item = Splitter>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
