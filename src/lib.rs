//! # splitrs
//!
//! Streaming hashsplitting (content-defined chunking) and hashsplit trees
//! for Rust.
//!
//! `splitrs` divides a byte stream into chunks whose boundaries depend on
//! the stream's *content* rather than on any fixed chunk size. As the
//! splitter reads, it maintains a rolling checksum over the last 64 bytes;
//! a chunk ends wherever the checksum has enough trailing zero bits. Insert
//! or delete a few bytes near the start of a stream and only the chunks
//! around the edit change; everything after re-synchronizes byte-identically.
//! That property is what makes hashsplitting the backbone of tools like
//! rsync, bup, and perkeep.
//!
//! On top of the splitter sits the hashsplit *tree*: each chunk carries a
//! `level` (how strongly the boundary condition held), and [`TreeBuilder`]
//! folds the (chunk, level) sequence into a multi-way tree whose interior
//! shape is itself content-defined. A local edit perturbs only the path from
//! the edited region to the root; sibling subtrees are reused unchanged, and
//! [`Node::seek`] gives random access to any input position.
//!
//! ## Design Philosophy
//!
//! This crate is a small, composable primitive. It deliberately does not:
//!
//! - Manage files or paths (any [`std::io::Read`] source works)
//! - Hash or content-address chunks (attach that via the tree's transform
//!   hook)
//! - Persist anything (the tree is an in-memory structure; storage is yours)
//!
//! ## Examples
//!
//! Splitting a stream:
//!
//! ```
//! use std::io::Cursor;
//! use splitrs::{SplitConfig, Splitter};
//!
//! # fn main() -> Result<(), splitrs::SplitError> {
//! let data = vec![0u8; 1024];
//! let splitter = Splitter::new(SplitConfig::default());
//!
//! let mut total = 0;
//! for chunk in splitter.split(Cursor::new(data)) {
//!     let chunk = chunk?;
//!     assert!(!chunk.is_empty());
//!     total += chunk.len();
//! }
//! assert_eq!(total, 1024);
//! # Ok(())
//! # }
//! ```
//!
//! Building a tree and seeking into it:
//!
//! ```
//! use std::io::Cursor;
//! use splitrs::{split_to_tree, SplitConfig};
//!
//! # fn main() -> Result<(), splitrs::SplitError> {
//! let data: Vec<u8> = (0..100_000u32).map(|i| (i ^ (i >> 3)) as u8).collect();
//! let root = split_to_tree(Cursor::new(&data), SplitConfig::default())?
//!     .expect("non-empty input");
//!
//! assert_eq!(root.offset, 0);
//! assert_eq!(root.size, data.len() as u64);
//!
//! let leaf = root.seek(50_000)?;
//! assert!(leaf.offset <= 50_000 && 50_000 < leaf.end());
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! [`SplitConfig`] controls boundary density (`split_bits`, mean chunk size
//! about `2^split_bits` bytes), the minimum and maximum chunk sizes, and
//! whether the checksum window is reset between chunks. The rolling checksum
//! itself is pluggable through [`RollingHash`]; [`Cp32`] is the default and
//! [`Buzhash32`] ships as an alternative.
//!
//! ## Features
//!
//! - **`async-io`** - Runtime-agnostic async splitting via
//!   [`split_async`] over `futures-io::AsyncRead`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

// Public modules
mod chunk;
mod config;
mod error;
mod rolling;
mod splitter;
mod tree;

// Async streaming support (feature-gated)
#[cfg(feature = "async-io")]
mod async_stream;

//
// Public API surface
//

/// Chunk type emitted by the splitter.
pub use chunk::Chunk;

/// Splitting engine for processing byte streams.
pub use splitter::{CancelToken, SplitIter, Splitter};

/// Configuration options for splitting behavior.
pub use config::{SplitConfig, DEFAULT_MAX_SIZE, DEFAULT_MIN_SIZE, DEFAULT_SPLIT_BITS};

/// Error types for splitting operations.
pub use error::SplitError;

/// Rolling checksum contract and implementations.
pub use rolling::{Buzhash32, Cp32, RollingHash};

/// Hashsplit tree types.
pub use tree::{LeafChunks, Node, TransformError, TreeBuilder};

/// Async splitting support (requires `async-io` feature).
#[cfg(feature = "async-io")]
pub use async_stream::{split_async, SplitStream};

/// Splits a reader with the default checksum and folds the chunks into a
/// hashsplit tree.
///
/// Returns `Ok(None)` for an empty input. For custom checksums or a
/// transform hook, drive [`Splitter`] and [`TreeBuilder`] directly.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use splitrs::{split_to_tree, SplitConfig};
///
/// let root = split_to_tree(Cursor::new(b"hello"), SplitConfig::default())?
///     .expect("non-empty input");
/// assert_eq!(root.size, 5);
/// # Ok::<(), splitrs::SplitError>(())
/// ```
pub fn split_to_tree<R: std::io::Read>(
    reader: R,
    config: SplitConfig,
) -> Result<Option<Node>, SplitError> {
    let mut builder = TreeBuilder::new();
    for chunk in Splitter::new(config).split(reader) {
        builder.add_chunk(chunk?)?;
    }
    builder.finish()
}
