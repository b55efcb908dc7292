//! Markdown ATX header splitting.
//!
//! A header line of the configured level is emitted as its own piece, and
//! the header text is stamped onto it and onto everything after it until the
//! next header of the same level:
//!
//! ```text
//! level = 2
//!
//! "Intro\n## Setup\nInstall it.\n## Usage\nRun it."
//!
//! "Intro"           {}
//! "\n## Setup\n"    {header: "Setup"}
//! "Install it."     {header: "Setup"}
//! "\n## Usage\n"    {header: "Usage"}
//! "Run it."         {header: "Usage"}
//! ```
//!
//! A header line must be preceded and followed by a newline, so a header on
//! the very first line of a document is not recognized at this level.
//! Deeper levels never match: `"\n### x\n"` is not a level-2 header.

use regex_lite::Regex;

use crate::chunk::{Chunk, ChunkIds, Metadata, HEADER_KEY};

/// Splits Markdown on headers of one level.
#[derive(Debug, Clone)]
pub struct HeaderSplitter {
    level: u8,
    pattern: Regex,
}

impl HeaderSplitter {
    /// Create a splitter for `#`-headers of `level`.
    ///
    /// # Panics
    ///
    /// Panics if `level` is not in `1..=6`.
    #[must_use]
    pub fn new(level: u8) -> Self {
        assert!((1..=6).contains(&level), "header level must be in 1..=6");
        let pattern = Regex::new(&format!(r"\n#{{{level}}} (.*)\n")).expect("valid header pattern");
        Self { level, pattern }
    }

    /// The header level this splitter matches.
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Partition `content`, carrying the latest header forward.
    ///
    /// The "latest header" lives only for the duration of this call.
    pub fn split(&self, content: &str, ids: &mut ChunkIds) -> Vec<Chunk> {
        let mut pieces = Vec::new();
        let mut current: Option<String> = None;
        let mut last = 0;

        for captures in self.pattern.captures_iter(content) {
            let Some(line) = captures.get(0) else {
                continue;
            };

            if line.start() > last {
                pieces.push(Chunk::new(
                    ids,
                    &content[last..line.start()],
                    header_metadata(current.as_deref()),
                ));
            }

            let header = captures.get(1).map_or("", |m| m.as_str()).trim().to_string();
            pieces.push(Chunk::new(
                ids,
                line.as_str(),
                header_metadata(Some(&header)),
            ));
            current = Some(header);
            last = line.end();
        }

        if last < content.len() {
            pieces.push(Chunk::new(
                ids,
                &content[last..],
                header_metadata(current.as_deref()),
            ));
        }

        pieces
    }
}

fn header_metadata(header: Option<&str>) -> Metadata {
    header
        .map(|h| Metadata::from([(HEADER_KEY.to_string(), h.to_string())]))
        .unwrap_or_default()
}
