//! # cleave
//!
//! Structure-aware recursive text chunking for retrieval pipelines.
//!
//! ## The Problem
//!
//! Embedding models have input limits. Documents don't fit. You need to split
//! them into pieces ("chunks") small enough to embed, without cutting through
//! the structure that gives them meaning:
//!
//! - A section split away from its header loses its topic
//! - A code block glued onto prose, or cut in half, embeds poorly
//! - A sentence split mid-word is garbage
//! - Without overlap, a fact that straddles a boundary is found by neither side
//!
//! ## The Approach
//!
//! Split on the most structural boundary first. Only pieces that are still too
//! large are split again with the next, finer boundary:
//!
//! ```text
//! Markdown cascade:
//!
//! # .. ######  ->  ``` fences  ->  ---  ->  "\n\n"  ->  "\n"  ->  sentence  ->  " "  ->  ""
//!
//! 1. Split on level-1 headers, pack pieces greedily up to max_chunk_size
//! 2. A section still too large? Split it on level-2 headers
//! 3. ...and so on down to single characters, which always fit
//! ```
//!
//! Structural metadata rides along. Header text is recorded on every piece of
//! its section, and a chunk keeps the keys that all of its pieces agree on.
//! Once the code-block splitter runs, a fenced block is never merged with
//! neighbors and is only cut when it alone exceeds the budget. Under
//! `ByHeader` that happens only inside sections larger than the budget; a
//! section that fits is one chunk, code and all.
//!
//! ## Quick Start
//!
//! ```rust
//! use cleave::{chunk, MarkdownStrategy, Strategy};
//!
//! let doc = "Intro.\n## Install\nRun `make`.\n```sh\nmake install\n```\n## Usage\nCall it.";
//! let chunks = chunk(doc, Strategy::Markdown(MarkdownStrategy::ByHeader), 30, 0).unwrap();
//!
//! let joined: String = chunks.iter().map(|c| c.text()).collect();
//! assert_eq!(joined, doc);
//!
//! let code = chunks.iter().find(|c| c.get("type") == Some("code_block")).unwrap();
//! assert_eq!(code.get("language"), Some("sh"));
//! assert_eq!(code.get("header"), Some("Install"));
//! ```
//!
//! ## Guarantees
//!
//! | Property | Holds when |
//! |----------|------------|
//! | Every chunk has at most `max_chunk_size` chars | always |
//! | Chunks concatenate back to the input | `max_overlap_size == 0` |
//! | Same input, same output (text, metadata, ids) | always |
//! | A fitting code block is exactly one chunk | `ByCodeBlock`, or its section exceeds `max_chunk_size` |
//!
//! Lengths are counted in Unicode scalar values, not bytes.
//!
//! ## Custom Cascades
//!
//! ```rust
//! use cleave::{Budget, Cascade, Chunker, RecursiveChunker, Splitter};
//!
//! let cascade = Cascade::new(vec![
//!     Splitter::tag("section"),
//!     Splitter::pattern(r"\n=+\n").unwrap(),
//!     Splitter::sentence(),
//! ]);
//! let chunker = RecursiveChunker::new(cascade, Budget::new(200, 20).unwrap());
//! let chunks = chunker.chunk("<section>One.</section><section>Two.</section>").unwrap();
//! assert!(!chunks.is_empty());
//! ```

mod budget;
mod chunk;
mod code_block;
mod delimiter;
mod error;
mod header;
mod html;
mod markdown;
mod overlap;
mod recursive;
mod render;
mod splitter;
mod strategy;
mod tag;
mod text;

pub use budget::Budget;
pub use chunk::{
    Chunk, ChunkIds, Metadata, CODE_BLOCK_TYPE, HEADER_KEY, ID_KEY, INDEX_KEY, LANGUAGE_KEY,
    PREV_KEY, TYPE_KEY,
};
pub use code_block::CodeBlockSplitter;
pub use delimiter::DelimiterSplitter;
pub use error::{Error, Result};
pub use header::HeaderSplitter;
pub use html::{HtmlChunker, HtmlStrategy};
pub use markdown::{MarkdownChunker, MarkdownStrategy};
pub use recursive::RecursiveChunker;
pub use render::render_chunks;
pub use splitter::{Cascade, Splitter};
pub use strategy::Strategy;
pub use tag::TagSplitter;
pub use text::{text_cascade, TextChunker};

/// A document chunker.
///
/// All chunkers implement this trait, enabling polymorphic usage:
///
/// ```rust
/// use cleave::{Chunker, HtmlChunker, HtmlStrategy, TextChunker};
///
/// fn count(chunker: &dyn Chunker, text: &str) -> usize {
///     chunker.chunk(text).map(|chunks| chunks.len()).unwrap_or(0)
/// }
///
/// let text = TextChunker::new(100, 0).unwrap();
/// let html = HtmlChunker::new(HtmlStrategy::HtmlParagraph, 100, 0).unwrap();
///
/// assert_eq!(count(&text, "Hello world."), 1);
/// assert_eq!(count(&html, "<p>Hello world.</p>"), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Each returned [`Chunk`] carries `id` and `index` metadata in addition
    /// to the structural keys gathered during assembly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnterminatedTag`] if a tag splitter in the cascade
    /// meets an opening tag that is never closed.
    fn chunk(&self, text: &str) -> Result<Vec<Chunk>>;

    /// Estimate the number of chunks for a given text length.
    ///
    /// Useful for pre-allocation. May be approximate.
    fn estimate_chunks(&self, text_len: usize) -> usize {
        // Conservative default
        (text_len / 500).max(1)
    }
}

/// Chunk `content` with the cascade `strategy` selects.
///
/// The budget is validated before any splitting begins.
///
/// ```rust
/// use cleave::{chunk, HtmlStrategy, Strategy};
///
/// let chunks = chunk("Before<h1>Main Title</h1>After", Strategy::Html(HtmlStrategy::HtmlHeader), 5, 0).unwrap();
/// assert!(chunks.iter().all(|c| c.len() <= 5));
/// assert_eq!(chunks[0].get("index"), Some("0"));
/// ```
///
/// # Errors
///
/// - [`Error::InvalidChunkSize`] if `max_chunk_size == 0`.
/// - [`Error::OverlapExceedsSize`] if `max_overlap_size > max_chunk_size`.
/// - [`Error::UnterminatedTag`] for HTML with an unclosed header or paragraph tag.
pub fn chunk(
    content: &str,
    strategy: Strategy,
    max_chunk_size: usize,
    max_overlap_size: usize,
) -> Result<Vec<Chunk>> {
    let budget = Budget::new(max_chunk_size, max_overlap_size)?;
    strategy.chunker(budget).chunk(content)
}
