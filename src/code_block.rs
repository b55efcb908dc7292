//! Fenced code block splitting.
//!
//! Code blocks are the canonical non-mergeable piece: a function split
//! across two chunks, or glued onto the prose around it, embeds poorly.
//! This splitter isolates each fenced block and marks it so the assembler
//! never merges it with neighbors.
//!
//! ```text
//! "See:\n```rust\nfn main() {}\n```\nDone."
//!
//! "See:\n"                          {}
//! "```rust\nfn main() {}\n```\n"    {type: "code_block", language: "rust"}
//! "Done."                           {}
//! ```
//!
//! A fence without a language gets `language: "unknown"`. A block whose
//! closing fence is missing runs to the end of the content and is still
//! emitted as a code block; unlike unterminated HTML tags, this is common
//! in truncated documents and not worth failing over.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::chunk::{Chunk, ChunkIds, Metadata, CODE_BLOCK_TYPE, LANGUAGE_KEY, TYPE_KEY};

static RE_OPEN_FENCE: OnceLock<Regex> = OnceLock::new();
static RE_CLOSE_FENCE: OnceLock<Regex> = OnceLock::new();

const UNKNOWN_LANGUAGE: &str = "unknown";

/// Splits Markdown around fenced code blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeBlockSplitter;

impl CodeBlockSplitter {
    /// Create a code block splitter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Partition `content`, tagging every fenced block.
    pub fn split(&self, content: &str, ids: &mut ChunkIds) -> Vec<Chunk> {
        let open_fence = RE_OPEN_FENCE.get_or_init(|| Regex::new(r"```([^`\n]*)\n").unwrap());
        let close_fence = RE_CLOSE_FENCE.get_or_init(|| Regex::new(r"```(?:\n|$)").unwrap());

        let mut pieces = Vec::new();
        let mut last = 0;

        while let Some(open) = open_fence.captures_at(content, last) {
            let Some(fence) = open.get(0) else {
                break;
            };

            if fence.start() > last {
                pieces.push(Chunk::plain(ids, &content[last..fence.start()]));
            }

            let language = open
                .get(1)
                .and_then(|m| m.as_str().split_whitespace().next())
                .unwrap_or(UNKNOWN_LANGUAGE);
            let end = close_fence
                .find_at(content, fence.end())
                .map_or(content.len(), |m| m.end());

            pieces.push(Chunk::new(
                ids,
                &content[fence.start()..end],
                Metadata::from([
                    (TYPE_KEY.to_string(), CODE_BLOCK_TYPE.to_string()),
                    (LANGUAGE_KEY.to_string(), language.to_string()),
                ]),
            ));
            last = end;
        }

        if last < content.len() {
            pieces.push(Chunk::plain(ids, &content[last..]));
        }

        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(content: &str) -> Vec<Chunk> {
        CodeBlockSplitter::new().split(content, &mut ChunkIds::new())
    }

    #[test]
    fn test_isolates_code_block() {
        let pieces = split("See:\n```rust\nfn main() {}\n```\nDone.");
        let texts: Vec<&str> = pieces.iter().map(Chunk::text).collect();
        assert_eq!(texts, vec!["See:\n", "```rust\nfn main() {}\n```\n", "Done."]);

        assert!(pieces[0].metadata().is_empty());
        assert_eq!(pieces[1].get(TYPE_KEY), Some(CODE_BLOCK_TYPE));
        assert_eq!(pieces[1].get(LANGUAGE_KEY), Some("rust"));
        assert!(pieces[2].metadata().is_empty());
    }

    #[test]
    fn test_missing_language_is_unknown() {
        let pieces = split("```\nplain\n```\n");
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].get(LANGUAGE_KEY), Some(UNKNOWN_LANGUAGE));
    }

    #[test]
    fn test_unterminated_block_runs_to_end() {
        let pieces = split("Intro\n```python\nprint('hi')\n");
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[1].text(), "```python\nprint('hi')\n");
        assert_eq!(pieces[1].get(TYPE_KEY), Some(CODE_BLOCK_TYPE));
        assert_eq!(pieces[1].get(LANGUAGE_KEY), Some("python"));
    }

    #[test]
    fn test_closing_fence_at_end_of_content() {
        let pieces = split("```sh\nls\n```");
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].text(), "```sh\nls\n```");
    }

    #[test]
    fn test_multiple_blocks() {
        let content = "a\n```java\nx();\n```\nb\n```python\ny()\n```\nc";
        let pieces = split(content);
        let languages: Vec<Option<&str>> = pieces.iter().map(|p| p.get(LANGUAGE_KEY)).collect();
        assert_eq!(
            languages,
            vec![None, Some("java"), None, Some("python"), None]
        );
        let joined: String = pieces.iter().map(Chunk::text).collect();
        assert_eq!(joined, content);
    }

    #[test]
    fn test_no_blocks() {
        let pieces = split("just prose");
        assert_eq!(pieces.len(), 1);
        assert!(split("").is_empty());
    }
}
