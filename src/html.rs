//! HTML chunking.
//!
//! Same fallthrough shape as Markdown, with tag-based boundaries on top:
//!
//! ```text
//! HtmlHeader     <h1> .. <h6>   header text recorded as headerN / header
//! HtmlParagraph  <p>
//! HtmlLine       "<br>"
//! Sentence       UAX #29
//! Word           " "
//! Character      ""
//! ```
//!
//! HTML has no non-mergeable pieces. An opening `<h1>`..`<h6>` or `<p>` that
//! is never closed fails the call with [`Error::UnterminatedTag`].

use std::fmt;
use std::str::FromStr;

use crate::splitter::{Cascade, Splitter};
use crate::{Budget, Chunk, Chunker, Error, RecursiveChunker, Result};

/// Where an HTML cascade starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum HtmlStrategy {
    /// `<h1>` through `<h6>`.
    #[default]
    HtmlHeader,
    /// `<p>` elements.
    HtmlParagraph,
    /// `<br>` line breaks.
    HtmlLine,
    /// Sentence boundaries.
    Sentence,
    /// Spaces.
    Word,
    /// Single characters.
    Character,
}

impl HtmlStrategy {
    /// Every strategy, coarsest first.
    pub const ALL: [Self; 6] = [
        Self::HtmlHeader,
        Self::HtmlParagraph,
        Self::HtmlLine,
        Self::Sentence,
        Self::Word,
        Self::Character,
    ];

    /// The cascade starting at this strategy's boundary.
    #[must_use]
    pub fn cascade(self) -> Cascade {
        let mut splitters = Vec::new();
        if self <= Self::HtmlHeader {
            splitters.extend((1..=6).map(Splitter::html_header));
        }
        if self <= Self::HtmlParagraph {
            splitters.push(Splitter::html_paragraph());
        }
        if self <= Self::HtmlLine {
            splitters.push(Splitter::literal("<br>"));
        }
        if self <= Self::Sentence {
            splitters.push(Splitter::sentence());
        }
        if self <= Self::Word {
            splitters.push(Splitter::word());
        }
        Cascade::new(splitters)
    }

    /// The boundary-layer token for this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HtmlHeader => "HTML_HEADER",
            Self::HtmlParagraph => "HTML_PARAGRAPH",
            Self::HtmlLine => "HTML_LINE",
            Self::Sentence => "SENTENCE",
            Self::Word => "WORD",
            Self::Character => "CHARACTER",
        }
    }
}

impl fmt::Display for HtmlStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HtmlStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

/// Chunker for HTML documents.
///
/// ```rust
/// use cleave::{Chunker, HtmlChunker, HtmlStrategy};
///
/// let chunker = HtmlChunker::new(HtmlStrategy::HtmlHeader, 200, 0).unwrap();
/// let chunks = chunker.chunk("<h1>Title</h1><p>Body text.</p>").unwrap();
/// assert_eq!(chunks[0].get("header1"), Some("Title"));
/// ```
#[derive(Debug, Clone)]
pub struct HtmlChunker {
    strategy: HtmlStrategy,
    inner: RecursiveChunker,
}

impl HtmlChunker {
    /// Create an HTML chunker.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is invalid (see [`Budget::new`]).
    pub fn new(strategy: HtmlStrategy, max_chunk_size: usize, max_overlap_size: usize) -> Result<Self> {
        let budget = Budget::new(max_chunk_size, max_overlap_size)?;
        Ok(Self::with_budget(strategy, budget))
    }

    /// Create an HTML chunker from an already validated budget.
    #[must_use]
    pub fn with_budget(strategy: HtmlStrategy, budget: Budget) -> Self {
        let inner = RecursiveChunker::new(strategy.cascade(), budget)
            .with_non_mergeable(std::iter::empty::<String>());
        Self { strategy, inner }
    }

    /// The strategy this chunker starts from.
    #[must_use]
    pub fn strategy(&self) -> HtmlStrategy {
        self.strategy
    }
}

impl Chunker for HtmlChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        self.inner.chunk(text)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        self.inner.estimate_chunks(text_len)
    }
}
