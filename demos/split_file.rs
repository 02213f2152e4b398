//! Basic synchronous splitting example.
//!
//! Run with:
//!     cargo run --example split_file [path]
//!
//! Without a path, splits 1 MB of generated data.

use std::io::Cursor;

use splitrs::{SplitConfig, Splitter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = match std::env::args().nth(1) {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut seed = 0x5eedu64;
            (0..1024 * 1024)
                .map(|_| {
                    seed = seed
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    (seed >> 33) as u8
                })
                .collect()
        }
    };

    println!("Splitting {} bytes...\n", data.len());

    let splitter = Splitter::new(SplitConfig::default());

    let mut total_chunks = 0usize;
    let mut total_bytes = 0usize;

    for chunk in splitter.split(Cursor::new(&data)) {
        let chunk = chunk?;
        total_chunks += 1;
        total_bytes += chunk.len();
        println!(
            "chunk {:>4}: offset={:>9} len={:>7} level={}",
            total_chunks,
            chunk.offset,
            chunk.len(),
            chunk.level
        );
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    if total_chunks > 0 {
        println!("Average chunk size: {} bytes", total_bytes / total_chunks);
    }

    Ok(())
}
