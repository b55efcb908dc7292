//! Paired-tag splitting for HTML-like content.
//!
//! ## The State Machine
//!
//! ```text
//! INIT ──find <tag>──> PREFIX ──> TAG ──> SUFFIX ──more <tag>?──> INIT
//!   │                                        │
//!   └──no <tag>──> END (rest verbatim)       └──no──> END
//! ```
//!
//! Each cycle emits a `(prefix, tag, suffix)` triple:
//!
//! ```text
//! "Start<p>First</p>Middle<p>Second</p>End"
//!
//! prefix "Start"    tag "<p>First</p>"    suffix "Middle"
//! prefix ""         tag "<p>Second</p>"   suffix "End"
//! ```
//!
//! The suffix runs up to the next opening tag, so every cycle after the
//! first has an empty prefix. Empty pieces are kept; the assembler drops
//! empty chunks after merging.
//!
//! ## Matching Rules
//!
//! - Opening tags may carry attributes: `<h1 class="title">` opens `h1`.
//! - The first `</tag>` after the opening tag closes it. There is no nesting
//!   depth count, so `<div><div></div></div>` closes at the inner `</div>`.
//!   Header tags never nest in practice; `div`-style content may split early.
//! - An opening tag with no closing tag is malformed input and fails the
//!   whole split with [`Error::UnterminatedTag`]. Guessing a boundary would
//!   silently produce wrong chunks.
//!
//! ## Annotation
//!
//! A header tag annotates both its tag piece and its suffix with the tag's
//! text content (inner markup stripped, whitespace trimmed):
//!
//! ```text
//! "<h2>Getting <em>Started</em></h2>body"
//!
//! tag    {header2: "Getting Started", header: "Getting Started"}
//! suffix {header2: "Getting Started", header: "Getting Started"}
//! ```

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::chunk::{Chunk, ChunkIds, Metadata, HEADER_KEY};
use crate::{Error, Result};

static RE_MARKUP: OnceLock<Regex> = OnceLock::new();

/// What a tag splitter attaches to the tag and suffix pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Annotation {
    None,
    Header { level: u8 },
}

/// Splits content around each `<tag>...</tag>` span.
///
/// ## Example
///
/// ```rust
/// use cleave::{ChunkIds, TagSplitter};
///
/// let splitter = TagSplitter::html_header(1);
/// let pieces = splitter
///     .split("Before<h1>Main Title</h1>After", &mut ChunkIds::new())
///     .unwrap();
///
/// assert_eq!(pieces.len(), 3);
/// assert_eq!(pieces[1].text(), "<h1>Main Title</h1>");
/// assert_eq!(pieces[2].get("header1"), Some("Main Title"));
/// ```
#[derive(Debug, Clone)]
pub struct TagSplitter {
    tag: String,
    open: Regex,
    close: Regex,
    annotation: Annotation,
}

impl TagSplitter {
    /// Create a splitter for `tag` that attaches no metadata.
    ///
    /// # Panics
    ///
    /// Panics if `tag` is empty or contains characters other than ASCII
    /// alphanumerics, `-`, or `_`.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self::with_annotation(tag, Annotation::None)
    }

    /// Create a splitter for `<hN>` that records the header text.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not in `1..=6`.
    #[must_use]
    pub fn html_header(level: u8) -> Self {
        assert!((1..=6).contains(&level), "header level must be in 1..=6");
        Self::with_annotation(&format!("h{level}"), Annotation::Header { level })
    }

    /// Create a splitter for `<p>` paragraphs.
    #[must_use]
    pub fn html_paragraph() -> Self {
        Self::new("p")
    }

    fn with_annotation(tag: &str, annotation: Annotation) -> Self {
        assert!(
            !tag.is_empty()
                && tag
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'),
            "invalid tag name: {tag:?}"
        );
        let escaped = regex_lite::escape(tag);
        // Both patterns are built from an escaped, validated tag name.
        let open = Regex::new(&format!(r"<{escaped}(?:\s[^>]*)?>")).expect("valid open tag pattern");
        let close = Regex::new(&format!("</{escaped}>")).expect("valid close tag pattern");
        Self {
            tag: tag.to_string(),
            open,
            close,
            annotation,
        }
    }

    /// The tag name this splitter matches.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Split `content` into `(prefix, tag, suffix)` triples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnterminatedTag`] if an opening tag is never closed.
    pub fn split(&self, content: &str, ids: &mut ChunkIds) -> Result<Vec<Chunk>> {
        let mut pieces = Vec::new();
        let mut rest = content;

        loop {
            let Some(open) = self.open.find(rest) else {
                if !rest.is_empty() {
                    pieces.push(Chunk::plain(ids, rest));
                }
                break;
            };

            let close = self
                .close
                .find_at(rest, open.end())
                .ok_or_else(|| Error::UnterminatedTag {
                    tag: self.tag.clone(),
                })?;

            let prefix = &rest[..open.start()];
            let tag = &rest[open.start()..close.end()];
            let after = &rest[close.end()..];
            let (suffix, next) = match self.open.find(after) {
                Some(m) => after.split_at(m.start()),
                None => (after, ""),
            };

            let metadata = self.annotate(tag);
            pieces.push(Chunk::plain(ids, prefix));
            pieces.push(Chunk::new(ids, tag, metadata.clone()));
            pieces.push(Chunk::new(ids, suffix, metadata));

            if next.is_empty() {
                break;
            }
            rest = next;
        }

        Ok(pieces)
    }

    fn annotate(&self, tag: &str) -> Metadata {
        match self.annotation {
            Annotation::None => Metadata::new(),
            Annotation::Header { level } => {
                let markup = RE_MARKUP.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());
                let text = markup.replace_all(tag, "").trim().to_string();
                Metadata::from([
                    (format!("header{level}"), text.clone()),
                    (HEADER_KEY.to_string(), text),
                ])
            }
        }
    }
}
