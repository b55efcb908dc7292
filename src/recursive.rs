//! Recursive chunk assembly over a splitter cascade.
//!
//! Tries progressively finer splitters until every chunk fits the budget.
//!
//! ## The Algorithm
//!
//! Given a cascade `[h2, "\n\n", " ", ""]` and `max_chunk_size = 100`:
//!
//! ```text
//! 1. Split on h2 headers into pieces
//! 2. Greedily pack consecutive pieces into a buffer while it fits 100
//! 3. A piece that does not fit flushes the buffer:
//!    - if the piece fits on its own, it starts the next buffer
//!    - otherwise assemble that piece with ["\n\n", " ", ""] and splice the
//!      results in; the last result seeds the next buffer
//! 4. Flush, then run the overlap pass
//! ```
//!
//! Every level re-packs its output, but only the outermost level adds
//! overlap. Chunks that come back from a recursion are spliced into the
//! parent's list unstitched, so each seam receives overlap exactly once.
//!
//! Flushing a buffer merges its pieces into one chunk, keeping only the
//! metadata they all agree on. When a piece is assembled recursively, its own
//! metadata is inherited by every child chunk underneath the child's keys, so
//! text deep inside a section still knows which header it belongs to.
//!
//! ## Non-mergeable Pieces
//!
//! Pieces whose `type` is in the non-mergeable set (by default
//! `"code_block"`) are never packed with neighbors. They flush the buffer and
//! go straight to the output. One that is larger than the budget is hard
//! split into fixed-size fragments chained by `prev` ids rather than
//! re-split structurally:
//!
//! ```text
//! max = 5, code block of 12 chars
//!
//! [0..5]  {type: code_block}
//! [5..10] {type: code_block, prev: <id of first>}
//! [10..12]{type: code_block, prev: <id of second>}
//! ```
//!
//! ## Termination
//!
//! Each recursion hands a strictly smaller cascade to the next level, and the
//! cascade always ends with the character splitter, whose pieces have length 1.
//! Depth is therefore bounded by the cascade length.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::chunk::{hard_split, Chunk, ChunkIds, Metadata, CODE_BLOCK_TYPE, TYPE_KEY};
use crate::splitter::{Cascade, Splitter};
use crate::{Budget, Chunker, Result};

/// Recursive chunk assembler.
///
/// ## Example
///
/// ```rust
/// use cleave::{Budget, Cascade, Chunker, RecursiveChunker, Splitter};
///
/// let chunker = RecursiveChunker::new(
///     Cascade::new(vec![Splitter::word()]),
///     Budget::no_overlap(5).unwrap(),
/// );
/// let chunks = chunker.chunk("Hello World").unwrap();
/// let texts: Vec<&str> = chunks.iter().map(|c| c.text()).collect();
/// assert_eq!(texts, ["Hello", " ", "World"]);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    cascade: Cascade,
    budget: Budget,
    non_mergeable: BTreeSet<String>,
}

impl RecursiveChunker {
    /// Create an assembler. Fenced code blocks are non-mergeable by default.
    #[must_use]
    pub fn new(cascade: Cascade, budget: Budget) -> Self {
        Self {
            cascade,
            budget,
            non_mergeable: BTreeSet::from([CODE_BLOCK_TYPE.to_string()]),
        }
    }

    /// Replace the set of `type` values that must never be merged.
    #[must_use]
    pub fn with_non_mergeable<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.non_mergeable = types.into_iter().map(Into::into).collect();
        self
    }

    /// The cascade this assembler splits with.
    #[must_use]
    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// The budget this assembler enforces.
    #[must_use]
    pub fn budget(&self) -> Budget {
        self.budget
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>> {
        if text.is_empty() {
            return Ok(vec![]);
        }

        let mut assembly = Assembly::new(&self.non_mergeable);
        let chunks = assembly.assemble(text, self.cascade.splitters(), self.budget, &Metadata::new())?;

        debug!(
            chunks = chunks.len(),
            input_len = text.len(),
            max_chunk_size = self.budget.max_chunk_size(),
            max_overlap_size = self.budget.max_overlap_size(),
            "assembled chunks"
        );

        Ok(chunks
            .into_iter()
            .enumerate()
            .map(|(index, chunk)| chunk.stamped(index))
            .collect())
    }

    fn estimate_chunks(&self, text_len: usize) -> usize {
        (text_len / self.budget.max_chunk_size()).max(1)
    }
}

/// State for one top-level chunking call.
pub(crate) struct Assembly<'a> {
    non_mergeable: &'a BTreeSet<String>,
    pub(crate) ids: ChunkIds,
    depth: usize,
}

impl<'a> Assembly<'a> {
    pub(crate) fn new(non_mergeable: &'a BTreeSet<String>) -> Self {
        Self {
            non_mergeable,
            ids: ChunkIds::new(),
            depth: 0,
        }
    }

    pub(crate) fn is_non_mergeable(&self, chunk: &Chunk) -> bool {
        chunk
            .get(TYPE_KEY)
            .is_some_and(|kind| self.non_mergeable.contains(kind))
    }

    /// Assemble `content` into chunks that each fit `budget`.
    pub(crate) fn assemble(
        &mut self,
        content: &str,
        splitters: &[Splitter],
        budget: Budget,
        parent: &Metadata,
    ) -> Result<Vec<Chunk>> {
        let max_size = budget.max_chunk_size();

        let Some((first, rest)) = splitters.split_first() else {
            // Only reachable from hand-built cascades: force split as last resort
            let whole = Chunk::new(&mut self.ids, content, parent.clone());
            return Ok(hard_split(&whole, max_size, &mut self.ids));
        };

        let mut output = Vec::new();
        let mut buffer = PieceBuffer::default();

        for piece in first.split(content, &mut self.ids)? {
            if self.is_non_mergeable(&piece) {
                output.extend(buffer.flush(&mut self.ids));
                if budget.fits(piece.len()) {
                    output.push(piece);
                } else {
                    let fragments = hard_split(&piece, max_size, &mut self.ids);
                    debug!(
                        len = piece.len(),
                        fragments = fragments.len(),
                        "hard split non-mergeable piece"
                    );
                    output.extend(fragments);
                }
                continue;
            }

            if !budget.would_overflow(buffer.size(), piece.len()) {
                buffer.push(piece);
                continue;
            }

            output.extend(buffer.flush(&mut self.ids));

            if budget.fits(piece.len()) {
                buffer.push(piece);
                continue;
            }

            trace!(
                depth = self.depth,
                len = piece.len(),
                remaining_splitters = rest.len(),
                "recursing into oversized piece"
            );
            self.depth += 1;
            let sub_chunks = self.assemble(piece.text(), rest, budget, piece.metadata());
            self.depth -= 1;

            let mut sub_chunks = sub_chunks?;
            let Some(last) = sub_chunks.pop() else {
                continue;
            };
            output.extend(sub_chunks);
            if self.is_non_mergeable(&last) {
                output.push(last);
            } else {
                buffer.push(last);
            }
        }

        output.extend(buffer.flush(&mut self.ids));

        // Seams are stitched once, by the outermost level.
        let stitch = if self.depth == 0 {
            budget
        } else {
            budget.without_overlap()
        };
        let merged = self.merge_with_overlap(output, splitters, stitch)?;
        Ok(merged
            .into_iter()
            .map(|chunk| chunk.inherit(parent))
            .filter(|chunk| !chunk.is_empty())
            .collect())
    }
}

/// Pieces waiting to be merged into the next chunk.
#[derive(Debug, Default)]
pub(crate) struct PieceBuffer {
    pieces: Vec<Chunk>,
    size: usize,
}

impl PieceBuffer {
    pub(crate) fn push(&mut self, piece: Chunk) {
        self.size += piece.len();
        self.pieces.push(piece);
    }

    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Merge everything buffered into one chunk and reset.
    pub(crate) fn flush(&mut self, ids: &mut ChunkIds) -> Option<Chunk> {
        self.size = 0;
        Chunk::merge_all(ids, self.pieces.drain(..))
    }
}
