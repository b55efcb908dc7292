//! The Chunk type: a run of text with structural metadata.
//!
//! The same value type flows through the whole pipeline. A splitter emits
//! "pieces", the assembler merges and recurses over them, and what comes out
//! the other end are "chunks". Nothing is mutated in place: every merge,
//! inheritance, or stamp produces a new value.
//!
//! ## Metadata Merge
//!
//! Merging two chunks keeps only the metadata both agree on:
//!
//! ```text
//! a: "Intro "   {header: "Setup", header2: "Setup"}
//! b: "text."    {header: "Setup"}
//!
//! merge(a, b): "Intro text."  {header: "Setup"}
//! ```
//!
//! A key survives only if present on both sides with an identical value.
//! Once content crosses a structural boundary, metadata that no longer
//! applies to the whole run is dropped.
//!
//! Empty chunks carry no content, so they do not take part in the
//! intersection. An empty prefix in front of a tag does not erase the tag's
//! header metadata.

use std::collections::BTreeMap;
use std::fmt;

/// String-to-string metadata attached to a chunk.
///
/// Ordered so that rendering and comparisons are deterministic.
pub type Metadata = BTreeMap<String, String>;

/// Metadata key holding the most recent header text.
pub const HEADER_KEY: &str = "header";
/// Metadata key classifying a chunk (e.g. [`CODE_BLOCK_TYPE`]).
pub const TYPE_KEY: &str = "type";
/// Metadata key holding a fenced code block's language.
pub const LANGUAGE_KEY: &str = "language";
/// Metadata key linking a hard-split fragment to its predecessor's id.
pub const PREV_KEY: &str = "prev";
/// Metadata key holding a chunk's id in final output.
pub const ID_KEY: &str = "id";
/// Metadata key holding a chunk's zero-based position in final output.
pub const INDEX_KEY: &str = "index";
/// The `type` value of fenced code blocks.
pub const CODE_BLOCK_TYPE: &str = "code_block";

/// Source of chunk ids for a single chunking call.
///
/// Ids only need to be unique within one call's output. A fresh sequence per
/// top-level call keeps output deterministic across calls.
#[derive(Debug, Default)]
pub struct ChunkIds {
    next: u64,
}

impl ChunkIds {
    /// Start a new sequence at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Take the next id.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// A piece of text with its metadata.
///
/// ```rust
/// use cleave::{Chunk, ChunkIds, Metadata};
///
/// let mut ids = ChunkIds::new();
/// let mut metadata = Metadata::new();
/// metadata.insert("header".into(), "Intro".into());
///
/// let chunk = Chunk::new(&mut ids, "Hello", metadata);
/// assert_eq!(chunk.len(), 5);
/// assert_eq!(chunk.get("header"), Some("Intro"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    id: u64,
    text: String,
    metadata: Metadata,
}

impl Chunk {
    /// Create a chunk with a fresh id.
    pub fn new(ids: &mut ChunkIds, text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            id: ids.next_id(),
            text: text.into(),
            metadata,
        }
    }

    /// Create a chunk with no metadata.
    pub fn plain(ids: &mut ChunkIds, text: impl Into<String>) -> Self {
        Self::new(ids, text, Metadata::new())
    }

    /// The chunk's id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The chunk text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The chunk metadata.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Look up a single metadata value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Consume the chunk, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Concatenate two chunks, keeping only metadata they agree on.
    ///
    /// An empty side has no say: the result takes the other side's metadata
    /// unchanged. A strict intersection would let the empty prefix a
    /// [`crate::TagSplitter`] emits before a leading `<h1>` wipe out that
    /// header, so HTML that opens with a tag keeps keys that a strict
    /// intersection would drop.
    #[must_use]
    pub fn merge(ids: &mut ChunkIds, first: &Self, second: &Self) -> Self {
        let mut text = String::with_capacity(first.text.len() + second.text.len());
        text.push_str(&first.text);
        text.push_str(&second.text);
        let metadata = if first.is_empty() {
            second.metadata.clone()
        } else if second.is_empty() {
            first.metadata.clone()
        } else {
            common_metadata(&first.metadata, &second.metadata)
        };
        Self::new(ids, text, metadata)
    }

    /// Merge a run of chunks left to right. `None` if the run is empty.
    ///
    /// Empty chunks are skipped when intersecting metadata, as in [`Chunk::merge`].
    pub fn merge_all<I>(ids: &mut ChunkIds, chunks: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut chunks = chunks.into_iter();
        let first = chunks.next()?;
        let mut rest = chunks.peekable();
        if rest.peek().is_none() {
            return Some(first);
        }

        let mut seen_content = !first.is_empty();
        let mut text = first.text;
        let mut metadata = first.metadata;
        for chunk in rest {
            if chunk.is_empty() {
                continue;
            }
            text.push_str(&chunk.text);
            metadata = if seen_content {
                common_metadata(&metadata, &chunk.metadata)
            } else {
                chunk.metadata
            };
            seen_content = true;
        }
        Some(Self::new(ids, text, metadata))
    }

    /// Union `parent` metadata underneath this chunk's own keys.
    ///
    /// The chunk's own values win on conflict. The id is kept so that
    /// `prev` links between fragments stay valid.
    #[must_use]
    pub fn inherit(self, parent: &Metadata) -> Self {
        if parent.is_empty() {
            return self;
        }
        let mut metadata = parent.clone();
        metadata.extend(self.metadata);
        Self {
            id: self.id,
            text: self.text,
            metadata,
        }
    }

    /// Stamp final `id` and `index` metadata.
    #[must_use]
    pub fn stamped(self, index: usize) -> Self {
        let mut metadata = self.metadata;
        metadata.insert(ID_KEY.to_string(), self.id.to_string());
        metadata.insert(INDEX_KEY.to_string(), index.to_string());
        Self {
            id: self.id,
            text: self.text,
            metadata,
        }
    }
}

/// Intersection-with-equal-value of two metadata maps.
fn common_metadata(first: &Metadata, second: &Metadata) -> Metadata {
    first
        .iter()
        .filter(|(key, value)| second.get(*key) == Some(*value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Slice a chunk into consecutive fragments of at most `max_size` characters.
///
/// Every fragment after the first carries a `prev` key with the id of the
/// fragment before it. Fragments are terminal: nothing re-merges them.
pub(crate) fn hard_split(chunk: &Chunk, max_size: usize, ids: &mut ChunkIds) -> Vec<Chunk> {
    debug_assert!(max_size > 0, "max_size must be > 0");

    let text = chunk.text();
    let mut fragments = Vec::with_capacity(chunk.len().div_ceil(max_size));
    let mut previous: Option<u64> = None;
    let mut start = 0;

    while start < text.len() {
        let end = text[start..]
            .char_indices()
            .nth(max_size)
            .map_or(text.len(), |(offset, _)| start + offset);

        let mut metadata = chunk.metadata().clone();
        if let Some(prev) = previous {
            metadata.insert(PREV_KEY.to_string(), prev.to_string());
        }

        let fragment = Chunk::new(ids, &text[start..end], metadata);
        previous = Some(fragment.id());
        fragments.push(fragment);
        start = end;
    }

    fragments
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk {{ id: {}, len: {}, metadata: {:?} }}",
            self.id,
            self.len(),
            self.metadata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_ids_are_sequential_per_sequence() {
        let mut ids = ChunkIds::new();
        let a = Chunk::plain(&mut ids, "a");
        let b = Chunk::plain(&mut ids, "b");
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);

        let mut fresh = ChunkIds::new();
        assert_eq!(Chunk::plain(&mut fresh, "c").id(), 0);
    }

    #[test]
    fn test_merge_keeps_agreeing_metadata() {
        let mut ids = ChunkIds::new();
        let a = Chunk::new(&mut ids, "Intro ", meta(&[("header", "Setup"), ("header2", "Setup")]));
        let b = Chunk::new(&mut ids, "text.", meta(&[("header", "Setup"), ("type", "x")]));

        let merged = Chunk::merge(&mut ids, &a, &b);
        assert_eq!(merged.text(), "Intro text.");
        assert_eq!(merged.metadata(), &meta(&[("header", "Setup")]));
    }

    #[test]
    fn test_merge_drops_conflicting_values() {
        let mut ids = ChunkIds::new();
        let a = Chunk::new(&mut ids, "a", meta(&[("header", "One")]));
        let b = Chunk::new(&mut ids, "b", meta(&[("header", "Two")]));
        assert!(Chunk::merge(&mut ids, &a, &b).metadata().is_empty());
    }

    #[test]
    fn test_merge_all_single_keeps_identity() {
        let mut ids = ChunkIds::new();
        let a = Chunk::new(&mut ids, "only", meta(&[("header", "H")]));
        let id = a.id();
        let merged = Chunk::merge_all(&mut ids, vec![a]).unwrap();
        assert_eq!(merged.id(), id);
        assert!(Chunk::merge_all(&mut ids, Vec::new()).is_none());
    }

    #[test]
    fn test_merge_all_matches_pairwise() {
        let mut ids = ChunkIds::new();
        let parts = vec![
            Chunk::new(&mut ids, "a", meta(&[("k", "v"), ("x", "1")])),
            Chunk::new(&mut ids, "b", meta(&[("k", "v"), ("x", "2")])),
            Chunk::new(&mut ids, "c", meta(&[("k", "v")])),
        ];
        let merged = Chunk::merge_all(&mut ids, parts).unwrap();
        assert_eq!(merged.text(), "abc");
        assert_eq!(merged.metadata(), &meta(&[("k", "v")]));
    }

    #[test]
    fn test_empty_chunks_do_not_vote() {
        let mut ids = ChunkIds::new();
        let header = meta(&[("header1", "Title")]);
        let parts = vec![
            Chunk::plain(&mut ids, ""),
            Chunk::new(&mut ids, "<h1>Title</h1>", header.clone()),
            Chunk::new(&mut ids, "body", header.clone()),
        ];
        let merged = Chunk::merge_all(&mut ids, parts).unwrap();
        assert_eq!(merged.text(), "<h1>Title</h1>body");
        assert_eq!(merged.metadata(), &header);

        let empty = Chunk::plain(&mut ids, "");
        let tagged = Chunk::new(&mut ids, "x", header.clone());
        assert_eq!(Chunk::merge(&mut ids, &empty, &tagged).metadata(), &header);
        assert_eq!(Chunk::merge(&mut ids, &tagged, &empty).metadata(), &header);
    }

    #[test]
    fn test_inherit_child_wins() {
        let mut ids = ChunkIds::new();
        let child = Chunk::new(&mut ids, "x", meta(&[("header", "Child")]));
        let id = child.id();
        let parent = meta(&[("header", "Parent"), ("header1", "Parent")]);

        let inherited = child.inherit(&parent);
        assert_eq!(inherited.id(), id);
        assert_eq!(inherited.get("header"), Some("Child"));
        assert_eq!(inherited.get("header1"), Some("Parent"));
    }

    #[test]
    fn test_hard_split_chains_prev() {
        let mut ids = ChunkIds::new();
        let block = Chunk::new(&mut ids, "abcdefghijkl", meta(&[("type", "code_block")]));
        let fragments = hard_split(&block, 5, &mut ids);

        let lens: Vec<usize> = fragments.iter().map(Chunk::len).collect();
        assert_eq!(lens, vec![5, 5, 2]);
        assert_eq!(fragments[0].get(PREV_KEY), None);
        assert_eq!(
            fragments[1].get(PREV_KEY),
            Some(fragments[0].id().to_string().as_str())
        );
        assert_eq!(
            fragments[2].get(PREV_KEY),
            Some(fragments[1].id().to_string().as_str())
        );
        assert!(fragments.iter().all(|f| f.get(TYPE_KEY) == Some("code_block")));
    }

    #[test]
    fn test_hard_split_respects_char_boundaries() {
        let mut ids = ChunkIds::new();
        let chunk = Chunk::plain(&mut ids, "日本語テキスト");
        let fragments = hard_split(&chunk, 3, &mut ids);
        let texts: Vec<&str> = fragments.iter().map(Chunk::text).collect();
        assert_eq!(texts, vec!["日本語", "テキス", "ト"]);
    }

    #[test]
    fn test_stamped_adds_id_and_index() {
        let mut ids = ChunkIds::new();
        ids.next_id();
        let chunk = Chunk::plain(&mut ids, "text").stamped(3);
        assert_eq!(chunk.get(ID_KEY), Some("1"));
        assert_eq!(chunk.get(INDEX_KEY), Some("3"));
    }

    #[test]
    fn test_len_counts_chars() {
        let mut ids = ChunkIds::new();
        let chunk = Chunk::plain(&mut ids, "héllo");
        assert_eq!(chunk.len(), 5);
        assert_eq!(chunk.text().len(), 6);
    }
}
