//! The overlap pass: stitch the tail of each chunk onto its successor.
//!
//! Runs at the end of every assembler level, after the greedy packing loop.
//! It re-packs the level's chunks and, whenever a buffer is flushed, keeps
//! the flushed chunk as the *donor* for the next one. Nested levels run it
//! with overlap disabled; the outermost level stitches every seam.
//!
//! ```text
//! max_chunk_size = 12, max_overlap_size = 4, words
//!
//! before: "alpha beta " | "gamma delta"
//! donor:  "beta " is 5 > 4, narrowed with the same cascade -> " "
//! after:  "alpha beta " | " gamma delta"
//! ```
//!
//! ## Narrowing
//!
//! A donor longer than `max_overlap_size` is re-assembled with the same
//! splitters under a budget of `max_overlap_size`, and only the final
//! fragment is kept. The overlap therefore starts on the same kind of
//! boundary as every other chunk instead of mid-word. A donor that holds
//! half of a tag (an HTML paragraph cut by the packing loop) cannot be split
//! on that tag, so it is narrowed again with the tag splitters left out:
//!
//! ```text
//! max_chunk_size = 20, max_overlap_size = 8, HTML paragraphs
//!
//! flushed: "<p>one two three "     <p> never closes here
//! donor:   "three "                narrowed on words instead
//! next:    "three four five six "
//! ```
//!
//! A seam only falls inside a word when that word alone is longer than
//! `max_overlap_size` and had to be split into characters.
//!
//! ## Barriers
//!
//! A non-mergeable chunk neither donates nor receives overlap. It resets the
//! donor, so the chunk right after it starts clean.

use tracing::{debug, trace};

use crate::chunk::{hard_split, Chunk};
use crate::recursive::{Assembly, PieceBuffer};
use crate::splitter::Splitter;
use crate::{Budget, Error, Result};

impl Assembly<'_> {
    /// Re-pack `chunks`, prefixing each new buffer with overlap from the
    /// previously flushed chunk.
    pub(crate) fn merge_with_overlap(
        &mut self,
        chunks: Vec<Chunk>,
        splitters: &[Splitter],
        budget: Budget,
    ) -> Result<Vec<Chunk>> {
        let mut output = Vec::with_capacity(chunks.len());
        let mut buffer = PieceBuffer::default();
        let mut donor: Option<Chunk> = None;

        for chunk in chunks {
            if self.is_non_mergeable(&chunk) {
                output.extend(buffer.flush(&mut self.ids));
                output.push(chunk);
                donor = None;
                continue;
            }

            let piece = if budget.fits(chunk.len()) {
                chunk
            } else {
                output.extend(buffer.flush(&mut self.ids));
                let mut fragments = hard_split(&chunk, budget.max_chunk_size(), &mut self.ids);
                let Some(last) = fragments.pop() else {
                    continue;
                };
                output.extend(fragments);
                donor = None;
                last
            };

            if buffer.is_empty() {
                let piece = self.with_overlap(donor.as_ref(), piece, budget);
                buffer.push(piece);
            } else if !budget.would_overflow(buffer.size(), piece.len()) {
                buffer.push(piece);
            } else {
                if let Some(flushed) = buffer.flush(&mut self.ids) {
                    donor = self.overlap_donor(&flushed, splitters, budget)?;
                    output.push(flushed);
                }
                let piece = self.with_overlap(donor.as_ref(), piece, budget);
                buffer.push(piece);
            }
        }

        output.extend(buffer.flush(&mut self.ids));
        Ok(output)
    }

    /// Prefix `piece` with `donor` when both limits allow it.
    fn with_overlap(&mut self, donor: Option<&Chunk>, piece: Chunk, budget: Budget) -> Chunk {
        match donor {
            Some(donor)
                if !donor.is_empty()
                    && donor.len() <= budget.max_overlap_size()
                    && budget.fits(donor.len() + piece.len()) =>
            {
                trace!(overlap = donor.len(), len = piece.len(), "applying overlap");
                Chunk::merge(&mut self.ids, donor, &piece)
            }
            _ => piece,
        }
    }

    /// The trailing fragment of `flushed` to carry into the next chunk.
    fn overlap_donor(
        &mut self,
        flushed: &Chunk,
        splitters: &[Splitter],
        budget: Budget,
    ) -> Result<Option<Chunk>> {
        let Some(window) = budget.overlap_window() else {
            return Ok(None);
        };
        if flushed.is_empty() {
            return Ok(None);
        }
        if window.fits(flushed.len()) {
            return Ok(Some(flushed.clone()));
        }

        let narrowed = self.assemble(flushed.text(), splitters, window, flushed.metadata());
        let mut fragments = match narrowed {
            Ok(fragments) => fragments,
            Err(Error::UnterminatedTag { tag }) => {
                debug!(%tag, "overlap donor cut through a tag, narrowing without tag splitters");
                let untagged: Vec<Splitter> = splitters
                    .iter()
                    .filter(|splitter| !matches!(splitter, Splitter::Tag(_)))
                    .cloned()
                    .collect();
                self.assemble(flushed.text(), &untagged, window, flushed.metadata())?
            }
            Err(err) => return Err(err),
        };
        Ok(fragments.pop())
    }
}
