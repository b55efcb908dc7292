//! Chunk budget configuration.
//!
//! ## The Two Limits
//!
//! A chunking call is governed by two numbers:
//!
//! - `max_chunk_size`: the hard ceiling on every emitted chunk.
//! - `max_overlap_size`: how many trailing characters of one chunk may be
//!   repeated at the start of the next.
//!
//! ```text
//! max_chunk_size = 20, max_overlap_size = 5
//!
//! Chunk 0: "The quick brown fox "
//! Chunk 1: "fox jumps over the "     <- "fox " borrowed from chunk 0
//! ```
//!
//! Sizes are counted in Unicode scalar values, not bytes. A character-level
//! split therefore always produces pieces of length 1, which is what lets the
//! recursive assembler promise termination for any `max_chunk_size >= 1`.

use crate::{Error, Result};

/// Size limits for one chunking call.
///
/// # Examples
///
/// ```rust
/// use cleave::Budget;
///
/// let budget = Budget::new(500, 50).unwrap();
/// assert_eq!(budget.max_chunk_size(), 500);
/// assert_eq!(budget.max_overlap_size(), 50);
///
/// assert!(Budget::new(0, 0).is_err());
/// assert!(Budget::new(10, 11).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Budget {
    max_chunk_size: usize,
    max_overlap_size: usize,
}

impl Budget {
    /// Create a validated budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `max_chunk_size == 0`, or
    /// [`Error::OverlapExceedsSize`] if `max_overlap_size > max_chunk_size`.
    pub fn new(max_chunk_size: usize, max_overlap_size: usize) -> Result<Self> {
        if max_chunk_size == 0 {
            return Err(Error::InvalidChunkSize(max_chunk_size));
        }
        if max_overlap_size > max_chunk_size {
            return Err(Error::OverlapExceedsSize {
                size: max_chunk_size,
                overlap: max_overlap_size,
            });
        }
        Ok(Self {
            max_chunk_size,
            max_overlap_size,
        })
    }

    /// Create a budget with no overlap.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChunkSize`] if `max_chunk_size == 0`.
    pub fn no_overlap(max_chunk_size: usize) -> Result<Self> {
        Self::new(max_chunk_size, 0)
    }

    /// The maximum length of any emitted chunk.
    #[must_use]
    pub const fn max_chunk_size(&self) -> usize {
        self.max_chunk_size
    }

    /// The maximum number of characters borrowed from a predecessor chunk.
    #[must_use]
    pub const fn max_overlap_size(&self) -> usize {
        self.max_overlap_size
    }

    /// Whether a piece of `len` characters fits on its own.
    #[must_use]
    pub const fn fits(&self, len: usize) -> bool {
        len <= self.max_chunk_size
    }

    /// Check if adding `additional` characters to `current` would exceed the ceiling.
    ///
    /// Useful for incremental chunk building.
    #[must_use]
    pub fn would_overflow(&self, current: usize, additional: usize) -> bool {
        current.saturating_add(additional) > self.max_chunk_size
    }

    /// The same ceiling with overlap disabled.
    pub(crate) const fn without_overlap(&self) -> Self {
        Self {
            max_chunk_size: self.max_chunk_size,
            max_overlap_size: 0,
        }
    }

    /// The budget used to narrow an overlap donor: chunks of at most
    /// `max_overlap_size`, with no overlap of their own.
    pub(crate) fn overlap_window(&self) -> Option<Self> {
        (self.max_overlap_size > 0).then(|| Self {
            max_chunk_size: self.max_overlap_size,
            max_overlap_size: 0,
        })
    }
}

impl Default for Budget {
    fn default() -> Self {
        // ~512 tokens, assuming ~4 chars/token
        Self {
            max_chunk_size: 2048,
            max_overlap_size: 0,
        }
    }
}

impl TryFrom<(usize, usize)> for Budget {
    type Error = Error;

    fn try_from((max_chunk_size, max_overlap_size): (usize, usize)) -> Result<Self> {
        Self::new(max_chunk_size, max_overlap_size)
    }
}
