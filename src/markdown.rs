//! Markdown chunking.
//!
//! A strategy names the coarsest boundary to try first. Every finer boundary
//! below it stays in the cascade as a fallback:
//!
//! ```text
//! ByHeader          # .. ###### ─┐
//! ByCodeBlock       ```           │ each strategy starts at its row
//! ByHorizontalLine  --- *** ___   │ and falls through every row below
//! ByParagraph       "\n\n"        │
//! ByLine            "\n"          │
//! BySentence        UAX #29       │
//! ByWord            " "           │
//! ByCharacter       ""           ─┘
//! ```
//!
//! Fenced code blocks are non-mergeable once the code-block splitter has
//! isolated them: a block that fits the budget is then exactly one chunk,
//! tagged `type: "code_block"` with its `language`. With `ByCodeBlock` that
//! holds for every block. With `ByHeader` the splitter only sees sections
//! larger than `max_chunk_size`, so a block in a fitting section stays inside
//! that section's chunk.

use std::fmt;
use std::str::FromStr;

use crate::splitter::{Cascade, Splitter};
use crate::{Budget, Chunk, Chunker, Error, RecursiveChunker, Result};

/// Where a Markdown cascade starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MarkdownStrategy {
    /// `#` headers, levels 1 through 6.
    #[default]
    ByHeader,
    /// Fenced code blocks.
    ByCodeBlock,
    /// Thematic breaks.
    ByHorizontalLine,
    /// Blank lines.
    ByParagraph,
    /// Newlines.
    ByLine,
    /// Sentence boundaries.
    BySentence,
    /// Spaces.
    ByWord,
    /// Single characters.
    ByCharacter,
}

impl MarkdownStrategy {
    /// Every strategy, coarsest first.
    pub const ALL: [Self; 8] = [
        Self::ByHeader,
        Self::ByCodeBlock,
        Self::ByHorizontalLine,
        Self::ByParagraph,
        Self::ByLine,
        Self::BySentence,
        Self::ByWord,
        Self::ByCharacter,
    ];

    /// The cascade starting at this strategy's boundary.
    #[must_use]
    pub fn cascade(self) -> Cascade {
        let mut splitters = Vec::new();
        if self <= Self::ByHeader {
            splitters.extend((1..=6).map(Splitter::markdown_header));
        }
        if self <= Self::ByCodeBlock {
            splitters.push(Splitter::code_block());
        }
        if self <= Self::ByHorizontalLine {
            splitters.push(Splitter::horizontal_rule());
        }
        if self <= Self::ByParagraph {
            splitters.push(Splitter::paragraph());
        }
        if self <= Self::ByLine {
            splitters.push(Splitter::line());
        }
        if self <= Self::BySentence {
            splitters.push(Splitter::sentence());
        }
        if self <= Self::ByWord {
            splitters.push(Splitter::word());
        }
        Cascade::new(splitters)
    }

    /// The boundary-layer token for this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ByHeader => "MARKDOWN_HEADER",
            Self::ByCodeBlock => "CODE_BLOCK",
            Self::ByHorizontalLine => "HORIZONTAL_LINE",
            Self::ByParagraph => "PARAGRAPH",
            Self::ByLine => "LINE",
            Self::BySentence => "SENTENCE",
            Self::ByWord => "WORD",
            Self::ByCharacter => "CHARACTER",
        }
    }
}

impl fmt::Display for MarkdownStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkdownStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

/// Chunker for Markdown documents.
///
/// ## Example
///
/// ```rust
/// use cleave::{Chunker, MarkdownChunker, MarkdownStrategy};
///
/// let chunker = MarkdownChunker::new(MarkdownStrategy::ByHeader, 40, 0).unwrap();
/// let doc = "Intro text.\n## Install\nRun the installer.\n## Usage\nCall it.";
/// let chunks = chunker.chunk(doc).unwrap();
///
/// let joined: String = chunks.iter().map(|c| c.text()).collect();
/// assert_eq!(joined, doc);
/// assert!(chunks.iter().all(|c| c.len() <= 40));
/// ```
#[derive(Debug, Clone)]
pub struct MarkdownChunker {
    strategy: MarkdownStrategy,
    inner: RecursiveChunker,
}

impl MarkdownChunker {
    /// Create a Markdown chunker.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is invalid (see [`Budget::new`]).
    pub fn new(
        strategy: MarkdownStrategy,
        max_chunk_size: usize,
        max_overlap_size: usize,
    ) -> Result<Self> {
        let budget = Budget::new(max_chunk_size, max_overlap_size)?;
        Ok(Self::with_budget(strategy, budget))
    }

    /// Create a Markdown chunker from an already validated budget.
    #[must_use]
    pub fn with_budget(strategy: MarkdownStrategy, budget: Budget) -> Self {
        Self {
            strategy,
            inner: RecursiveChunker::new(strategy.cascade(), budget),
        }
    }

    /// The strategy this chunker starts from.
    #[must_use]
    pub fn strategy(&self) -> MarkdownStrategy {
        self.strategy
    }
}

impl Chunker for MarkdownChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        self.inner.chunk(text)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        self.inner.estimate_chunks(text_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallthrough_lengths() {
        let lengths: Vec<usize> = MarkdownStrategy::ALL
            .into_iter()
            .map(|s| s.cascade().len())
            .collect();
        assert_eq!(lengths, vec![13, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_token_roundtrip() {
        for strategy in MarkdownStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<MarkdownStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn test_unknown_token() {
        let err = "BY_MAGIC".parse::<MarkdownStrategy>().unwrap_err();
        assert!(matches!(err, Error::UnknownStrategy(token) if token == "BY_MAGIC"));
        assert!("paragraph".parse::<MarkdownStrategy>().is_err());
    }

    #[test]
    fn test_header_metadata_follows_section() {
        let doc = "Intro.\n## Install\nRun the installer now.\n## Usage\nCall it.";
        let chunker = MarkdownChunker::new(MarkdownStrategy::ByHeader, 25, 0).unwrap();
        let chunks = chunker.chunk(doc).unwrap();

        let joined: String = chunks.iter().map(Chunk::text).collect();
        assert_eq!(joined, doc);

        let install = chunks
            .iter()
            .find(|c| c.text().contains("installer"))
            .unwrap();
        assert_eq!(install.get("header"), Some("Install"));
        assert_eq!(chunks.last().unwrap().get("header"), Some("Usage"));
    }

    #[test]
    fn test_code_block_is_its_own_chunk() {
        let doc = "Some text.\n```rust\nfn main() {}\n```\nMore text.";
        let chunker = MarkdownChunker::new(MarkdownStrategy::ByCodeBlock, 100, 0).unwrap();
        let chunks = chunker.chunk(doc).unwrap();

        let blocks: Vec<&Chunk> = chunks
            .iter()
            .filter(|c| c.get("type") == Some("code_block"))
            .collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text(), "```rust\nfn main() {}\n```\n");
        assert_eq!(blocks[0].get("language"), Some("rust"));
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn test_fitting_section_keeps_code_block_inline() {
        let doc = "Intro\n```sh\nls\n```\nmore";
        let chunks = MarkdownChunker::new(MarkdownStrategy::ByHeader, 100, 0)
            .unwrap()
            .chunk(doc)
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text(), doc);
        assert_eq!(chunks[0].get("type"), None);

        let chunks = MarkdownChunker::new(MarkdownStrategy::ByCodeBlock, 100, 0)
            .unwrap()
            .chunk(doc)
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1].get("type"), Some("code_block"));
        assert_eq!(chunks[1].get("language"), Some("sh"));
    }

    #[test]
    fn test_invalid_budget_rejected() {
        assert!(MarkdownChunker::new(MarkdownStrategy::ByParagraph, 0, 0).is_err());
        assert!(MarkdownChunker::new(MarkdownStrategy::ByParagraph, 5, 6).is_err());
    }
}
