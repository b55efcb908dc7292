//! Document-kind selection for the top-level [`chunk()`](crate::chunk()) entry point.

use std::fmt;

use crate::splitter::Cascade;
use crate::text::text_cascade;
use crate::{Budget, Chunker, HtmlChunker, HtmlStrategy, MarkdownChunker, MarkdownStrategy, TextChunker};

/// Which kind of document is being chunked, and where its cascade starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Markdown with a starting boundary.
    Markdown(MarkdownStrategy),
    /// HTML with a starting boundary.
    Html(HtmlStrategy),
    /// Plain text.
    #[default]
    Text,
}

impl Strategy {
    /// The cascade this strategy resolves to.
    #[must_use]
    pub fn cascade(self) -> Cascade {
        match self {
            Self::Markdown(strategy) => strategy.cascade(),
            Self::Html(strategy) => strategy.cascade(),
            Self::Text => text_cascade(),
        }
    }

    /// Build the chunker for this strategy.
    #[must_use]
    pub fn chunker(self, budget: Budget) -> Box<dyn Chunker> {
        match self {
            Self::Markdown(strategy) => Box::new(MarkdownChunker::with_budget(strategy, budget)),
            Self::Html(strategy) => Box::new(HtmlChunker::with_budget(strategy, budget)),
            Self::Text => Box::new(TextChunker::with_budget(budget)),
        }
    }
}

impl From<MarkdownStrategy> for Strategy {
    fn from(strategy: MarkdownStrategy) -> Self {
        Self::Markdown(strategy)
    }
}

impl From<HtmlStrategy> for Strategy {
    fn from(strategy: HtmlStrategy) -> Self {
        Self::Html(strategy)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown(strategy) => write!(f, "markdown:{strategy}"),
            Self::Html(strategy) => write!(f, "html:{strategy}"),
            Self::Text => f.write_str("text"),
        }
    }
}
