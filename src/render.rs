//! Plain-text rendering of a chunk sequence, for golden-file comparisons.
//!
//! ```text
//! 5 0
//!
//! --- Chunk 1 ---
//! Metadata: {"id": "0","index": "0"}
//! Hello
//!
//! --- Chunk 2 ---
//! Metadata: {"id": "1","index": "1"}
//!
//! ```
//!
//! Chunks are numbered from 1. Metadata keys are sorted and values are
//! written verbatim, without escaping.

use std::fmt::Write;

use crate::{Budget, Chunk};

/// Render `chunks` produced under `budget` in the golden-file format.
///
/// ```rust
/// use cleave::{chunk, render_chunks, Budget, Strategy};
///
/// let chunks = chunk("Hi there", Strategy::Text, 100, 0).unwrap();
/// let rendered = render_chunks(&chunks, Budget::no_overlap(100).unwrap());
/// assert_eq!(
///     rendered,
///     "100 0\n\n--- Chunk 1 ---\nMetadata: {\"id\": \"0\",\"index\": \"0\"}\nHi there"
/// );
/// ```
#[must_use]
pub fn render_chunks(chunks: &[Chunk], budget: Budget) -> String {
    let mut out = format!(
        "{} {}\n\n",
        budget.max_chunk_size(),
        budget.max_overlap_size()
    );

    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        let metadata = chunk
            .metadata()
            .iter()
            .map(|(key, value)| format!("\"{key}\": \"{value}\""))
            .collect::<Vec<_>>()
            .join(",");
        // Writing to a String cannot fail.
        let _ = write!(out, "--- Chunk {} ---\nMetadata: {{{metadata}}}\n{}", i + 1, chunk.text());
    }

    out
}
