//! Chunking Strategies Comparison
//!
//! Runs the same content through Markdown, HTML, and plain text cascades,
//! with and without overlap.
//!
//! ```bash
//! cargo run --example chunking_strategies
//! ```

use cleave::{chunk, render_chunks, Budget, Chunk, HtmlStrategy, MarkdownStrategy, Strategy};

fn preview(chunk: &Chunk) -> String {
    chunk.text().chars().take(50).collect::<String>().replace('\n', "\\n")
}

fn show(title: &str, chunks: &[Chunk]) {
    println!("{title}");
    println!("   Chunks: {}", chunks.len());
    for chunk in chunks {
        let header = chunk.get("header").unwrap_or("-");
        println!(
            "   [{}] ({:>3} chars, header: {header}): \"{}...\"",
            chunk.get("index").unwrap_or("?"),
            chunk.len(),
            preview(chunk)
        );
    }
    println!();
}

fn main() -> cleave::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("Document Chunking Strategies");
    println!("============================\n");

    let markdown = "Deep learning stacks many layers.

## History
Dr. Geoffrey Hinton pioneered backpropagation in the 1980s. His work laid the foundation for modern AI.

## Training
1. Forward pass: input flows through the network.
2. Loss computation: predictions are compared against ground truth.
3. Backpropagation: gradients flow backward, updating weights.

```rust
let loss = model.forward(&x).mse(&y);
```

---

Each layer learns increasingly abstract representations.";

    let html = "<h1>Deep Learning</h1><p>Deep learning stacks many layers.</p>\
        <h2>History</h2><p>Dr. Geoffrey Hinton pioneered backpropagation in the 1980s.</p>\
        <h2>Training</h2><p>Forward pass<br>Loss computation<br>Backpropagation</p>";

    // 1. Markdown, starting at headers
    let chunks = chunk(markdown, Strategy::Markdown(MarkdownStrategy::ByHeader), 160, 0)?;
    show("1. Markdown by header (max 160)", &chunks);

    // 2. Markdown, starting at paragraphs: code fences are no longer special
    let chunks = chunk(markdown, Strategy::Markdown(MarkdownStrategy::ByParagraph), 160, 0)?;
    show("2. Markdown by paragraph (max 160)", &chunks);

    // 3. HTML headers
    let chunks = chunk(html, Strategy::Html(HtmlStrategy::HtmlHeader), 100, 0)?;
    show("3. HTML by header (max 100)", &chunks);

    // 4. Plain text with overlap
    let chunks = chunk(markdown, Strategy::Text, 120, 30)?;
    show("4. Plain text (max 120, overlap 30)", &chunks);

    // Golden-file form of a small run
    let budget = Budget::new(40, 0)?;
    let chunks = chunk("Short note.\n\nAnother short note.", Strategy::Text, 40, 0)?;
    println!("--- Rendered ---\n{}", render_chunks(&chunks, budget));

    Ok(())
}
