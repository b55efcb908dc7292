//! Concrete chunking scenarios.
//!
//! Each test pins the exact output for a small input, so a behavioral change
//! in a splitter or the assembler shows up as a readable diff.

use cleave::{
    chunk, render_chunks, Budget, Cascade, Chunk, ChunkIds, Chunker, Error, HtmlStrategy,
    MarkdownChunker, MarkdownStrategy, RecursiveChunker, Splitter, Strategy, TagSplitter,
    TextChunker,
};

fn texts(chunks: &[Chunk]) -> Vec<&str> {
    chunks.iter().map(Chunk::text).collect()
}

// =============================================================================
// Splitters
// =============================================================================

#[test]
fn html_header_splits_into_three_annotated_pieces() {
    let pieces = TagSplitter::html_header(1)
        .split("Before<h1>Main Title</h1>After", &mut ChunkIds::new())
        .unwrap();

    assert_eq!(texts(&pieces), vec!["Before", "<h1>Main Title</h1>", "After"]);
    assert!(pieces[0].metadata().is_empty());
    for piece in &pieces[1..] {
        assert_eq!(piece.get("header1"), Some("Main Title"));
        assert_eq!(piece.get("header"), Some("Main Title"));
    }
}

#[test]
fn unterminated_tag_fails_before_yielding_the_tag() {
    let result =
        TagSplitter::html_header(1).split("Before<h1>Unclosed content", &mut ChunkIds::new());
    assert!(matches!(result, Err(Error::UnterminatedTag { ref tag }) if tag == "h1"));

    let err = chunk(
        "Before<h1>Unclosed content",
        Strategy::Html(HtmlStrategy::HtmlHeader),
        100,
        0,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "invalid HTML: <h1> is not properly terminated");
}

// =============================================================================
// Assembler
// =============================================================================

#[test]
fn words_pack_up_to_the_budget() {
    let chunker = RecursiveChunker::new(
        Cascade::new(vec![Splitter::word()]),
        Budget::no_overlap(5).unwrap(),
    );
    let chunks = chunker.chunk("Hello World").unwrap();
    assert_eq!(texts(&chunks), vec!["Hello", " ", "World"]);
}

#[test]
fn oversized_code_block_is_hard_split_with_prev_links() {
    // 12 characters in total
    let block = "```\nabcd\n```";
    assert_eq!(block.chars().count(), 12);

    let chunker = MarkdownChunker::new(MarkdownStrategy::ByCodeBlock, 5, 0).unwrap();
    let chunks = chunker.chunk(block).unwrap();

    let lens: Vec<usize> = chunks.iter().map(Chunk::len).collect();
    assert_eq!(lens, vec![5, 5, 2]);
    assert_eq!(chunks[0].get("prev"), None);
    assert_eq!(chunks[1].get("prev"), chunks[0].get("id"));
    assert_eq!(chunks[2].get("prev"), chunks[1].get("id"));
    assert!(chunks.iter().all(|c| c.get("type") == Some("code_block")));
    assert_eq!(texts(&chunks).concat(), block);
}

#[test]
fn fitting_code_block_is_one_chunk_with_language() {
    let doc = "Setup steps below.\n```bash\ncargo build\n```\nThat is all.";
    let chunks = chunk(doc, Strategy::Markdown(MarkdownStrategy::ByCodeBlock), 40, 0).unwrap();

    assert_eq!(
        texts(&chunks),
        vec!["Setup steps below.\n", "```bash\ncargo build\n```\n", "That is all."]
    );
    assert_eq!(chunks[1].get("type"), Some("code_block"));
    assert_eq!(chunks[1].get("language"), Some("bash"));
    assert_eq!(chunks[0].get("type"), None);
    assert_eq!(chunks[2].get("type"), None);
}

#[test]
fn nested_headers_accumulate_metadata() {
    let doc = "<h1>Guide</h1><h2>Install</h2>Download the archive and unpack it.";
    let chunks = chunk(doc, Strategy::Html(HtmlStrategy::HtmlHeader), 30, 0).unwrap();

    assert_eq!(texts(&chunks).concat(), doc);
    let body = chunks.last().unwrap();
    assert!(body.text().ends_with("unpack it."));
    assert_eq!(body.get("header1"), Some("Guide"));
    assert_eq!(body.get("header2"), Some("Install"));
    assert_eq!(body.get("header"), Some("Install"));
}

#[test]
fn single_word_yields_one_chunk_for_every_strategy() {
    let markdown = MarkdownStrategy::ALL.into_iter().map(Strategy::Markdown);
    let html = HtmlStrategy::ALL.into_iter().map(Strategy::Html);
    for strategy in markdown.chain(html).chain([Strategy::Text]) {
        let chunks = chunk("standalone", strategy, 20, 5).unwrap();
        assert_eq!(texts(&chunks), vec!["standalone"], "{strategy}");
        assert_eq!(chunks[0].get("index"), Some("0"));
    }
}

// =============================================================================
// Overlap
// =============================================================================

#[test]
fn overlap_seam_borrows_trailing_word() {
    let chunker = TextChunker::new(20, 6).unwrap();
    let chunks = chunker.chunk("aaa bbb ccc ddd eee fff").unwrap();
    assert_eq!(texts(&chunks), vec!["aaa bbb ccc ddd eee ", "eee fff"]);
}

#[test]
fn overlap_seam_is_suffix_of_predecessor() {
    let text = "Rust is fast. Rust is safe. Rust is fun. Rust is here.";
    let chunks = TextChunker::new(20, 6).unwrap().chunk(text).unwrap();

    assert_eq!(
        texts(&chunks),
        vec![
            "Rust is fast. ",
            "fast. Rust is safe. ",
            "safe. Rust is fun. ",
            "fun. Rust is here.",
        ]
    );
    for pair in chunks.windows(2) {
        let (prev, next) = (pair[0].text(), pair[1].text());
        let seam = (1..=6_usize.min(next.len()))
            .filter(|&k| next.is_char_boundary(k))
            .any(|k| prev.ends_with(&next[..k]));
        assert!(seam, "{next:?} does not start with a suffix of {prev:?}");
    }
}

#[test]
fn html_overlap_seam_lands_on_word_boundary() {
    // The first flushed chunk opens a <p> it does not close.
    let doc = "<p>one two three four five six seven</p>";
    let chunks = chunk(doc, Strategy::Html(HtmlStrategy::HtmlParagraph), 20, 8).unwrap();

    assert_eq!(
        texts(&chunks),
        vec!["<p>one two three ", "three four five six ", " seven</p>"]
    );
    // "three " is a whole word of the first chunk, not its last 8 characters.
    assert!(chunks[0].text().ends_with(" three "));
}

#[test]
fn code_block_resets_overlap() {
    let doc = "alpha beta gamma\n```\nx\n```\ndelta epsilon";
    let chunks = chunk(doc, Strategy::Markdown(MarkdownStrategy::ByCodeBlock), 20, 6).unwrap();

    let block = chunks
        .iter()
        .position(|c| c.get("type") == Some("code_block"))
        .unwrap();
    assert_eq!(chunks[block].text(), "```\nx\n```\n");
    assert_eq!(chunks[block + 1].text(), "delta epsilon");
}

// =============================================================================
// Determinism and Rendering
// =============================================================================

#[test]
fn ids_restart_for_every_call() {
    let chunker = TextChunker::new(5, 0).unwrap();
    let first = chunker.chunk("Hello World").unwrap();
    let second = chunker.chunk("Hello World").unwrap();
    assert_eq!(first, second);
    assert!(first.iter().all(|c| c.get("id").is_some()));
}

#[test]
fn golden_rendering() {
    let budget = Budget::no_overlap(30).unwrap();
    let doc = "Intro line.\n## Usage\nRun it.";
    let chunks = MarkdownChunker::with_budget(MarkdownStrategy::ByHeader, budget)
        .chunk(doc)
        .unwrap();

    let expected = "30 0\n\n\
        --- Chunk 1 ---\n\
        Metadata: {\"id\": \"0\",\"index\": \"0\"}\n\
        Intro line.\n## Usage\nRun it.";
    assert_eq!(render_chunks(&chunks, budget), expected);
}
