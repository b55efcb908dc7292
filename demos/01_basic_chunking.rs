//! Basic Markdown Chunking
//!
//! The minimal example: chunk a Markdown document for embedding.
//!
//! ```bash
//! cargo run --example 01_basic_chunking
//! RUST_LOG=cleave=debug cargo run --example 01_basic_chunking
//! ```

use cleave::{Chunker, MarkdownChunker, MarkdownStrategy};

fn main() -> cleave::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let document = "Machine learning models learn patterns from data.
## Training
Training has three steps: a forward pass, a loss computation, and backpropagation.
```python
loss = criterion(model(x), y)
loss.backward()
```
## Inference
At inference time the trained weights are frozen and only the forward pass runs.";

    let chunker = MarkdownChunker::new(MarkdownStrategy::ByHeader, 120, 0)?;
    let chunks = chunker.chunk(document)?;

    println!("Document: {} chars", document.chars().count());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!(
            "[{}] {} chars, header={:?}, type={:?}",
            chunk.get("index").unwrap_or("?"),
            chunk.len(),
            chunk.get("header"),
            chunk.get("type"),
        );
        println!("    {:?}", chunk.text());
    }

    // The code block stays whole and knows which section it came from.
    Ok(())
}
