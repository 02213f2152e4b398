//! Async splitting example.
//!
//! Splits a file through the runtime-agnostic async stream, using
//! tokio for I/O via the compat adapter.
//!
//! Run with:
//!     cargo run --example async_split --features async-io -- <path>

use futures_util::StreamExt;
use splitrs::{split_async, SplitConfig};
use tokio_util::compat::TokioAsyncReadCompatExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: async_split <path>")?;

    let file = tokio::fs::File::open(&path).await?;
    let mut stream = split_async(file.compat(), SplitConfig::default());

    let mut count = 0usize;
    let mut total = 0usize;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        count += 1;
        total += chunk.len();
        println!(
            "chunk {:>4}: offset={:>9} len={:>7} level={}",
            count,
            chunk.offset,
            chunk.len(),
            chunk.level
        );
    }

    println!("\n{}: {} chunks, {} bytes", path, count, total);
    Ok(())
}
