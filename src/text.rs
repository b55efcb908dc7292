//! Plain text chunking.
//!
//! One flat cascade, no structural splitters and no non-mergeable pieces:
//! paragraph, line, sentence, word, character.

use crate::splitter::{Cascade, Splitter};
use crate::{Budget, Chunk, Chunker, RecursiveChunker, Result};

/// The plain text cascade.
#[must_use]
pub fn text_cascade() -> Cascade {
    Cascade::new(vec![
        Splitter::paragraph(),
        Splitter::line(),
        Splitter::sentence(),
        Splitter::word(),
    ])
}

/// Chunker for plain text.
///
/// ```rust
/// use cleave::{Chunker, TextChunker};
///
/// let chunker = TextChunker::new(30, 0).unwrap();
/// let text = "First paragraph.\n\nSecond paragraph, a little longer.";
/// let chunks = chunker.chunk(text).unwrap();
/// assert!(chunks.iter().all(|c| c.len() <= 30));
/// ```
#[derive(Debug, Clone)]
pub struct TextChunker {
    inner: RecursiveChunker,
}

impl TextChunker {
    /// Create a plain text chunker.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is invalid (see [`Budget::new`]).
    pub fn new(max_chunk_size: usize, max_overlap_size: usize) -> Result<Self> {
        Ok(Self::with_budget(Budget::new(max_chunk_size, max_overlap_size)?))
    }

    /// Create a plain text chunker from an already validated budget.
    #[must_use]
    pub fn with_budget(budget: Budget) -> Self {
        Self {
            inner: RecursiveChunker::new(text_cascade(), budget)
                .with_non_mergeable(std::iter::empty::<String>()),
        }
    }
}

impl Chunker for TextChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        self.inner.chunk(text)
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        self.inner.estimate_chunks(text_len)
    }
}
