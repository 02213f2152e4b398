//! Core splitting engine - Splitter and SplitIter.
//!
//! This module implements the synchronous splitting API. It provides two
//! main types:
//!
//! - [`Splitter`] - Configures and initiates a split
//! - [`SplitIter`] - Iterator that yields chunks from a [`std::io::Read`] source
//!
//! # Example
//!
//! ```ignore
//! use splitrs::{Splitter, SplitConfig};
//! use std::fs::File;
//!
//! let file = File::open("data.bin")?;
//! let splitter = Splitter::new(SplitConfig::default());
//!
//! for chunk in splitter.split(file) {
//!     let chunk = chunk?;
//!     println!("chunk: {} bytes, level {}", chunk.len(), chunk.level);
//! }
//! # Ok::<(), splitrs::SplitError>(())
//! ```

use std::io::Read;

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::rolling::{Cp32, RollingHash};
use crate::splitter::cancel::CancelToken;
use crate::splitter::engine::SplitEngine;

/// Read granularity for the streaming iterator.
const READ_BLOCK: usize = 8 * 1024;

/// A splitter that divides byte streams into content-defined chunks.
///
/// `Splitter` is the high-level API for synchronous hashsplitting. It holds
/// a configuration plus the rolling checksum and provides methods to split
/// data from various sources. Every emitted chunk carries a *level*: the
/// number of trailing zero bits of the boundary checksum beyond
/// `split_bits`, which [`TreeBuilder`] uses to shape the hashsplit tree.
///
/// A splitter handles exactly one stream; it holds mutable checksum state
/// and is not meant to be shared. Use one instance per stream.
///
/// # Example
///
/// ```
/// use splitrs::{Splitter, SplitConfig};
/// use std::io::Cursor;
///
/// let data = b"some data to split";
/// let splitter = Splitter::new(SplitConfig::default());
/// let chunks: Vec<_> = splitter
///     .split(Cursor::new(&data[..]))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(chunks.len(), 1); // short input: one final chunk
/// # Ok::<(), splitrs::SplitError>(())
/// ```
///
/// [`TreeBuilder`]: crate::TreeBuilder
#[derive(Debug, Clone)]
pub struct Splitter<H = Cp32> {
    config: SplitConfig,
    hasher: H,
}

impl Splitter<Cp32> {
    /// Creates a splitter with the given configuration and the default
    /// [`Cp32`] checksum.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::{Splitter, SplitConfig};
    ///
    /// let splitter = Splitter::new(SplitConfig::default());
    /// ```
    pub fn new(config: SplitConfig) -> Self {
        Self::with_hasher(config, Cp32::new())
    }
}

impl<H: RollingHash> Splitter<H> {
    /// Creates a splitter with a custom rolling checksum.
    ///
    /// The checksum must be freshly initialized. Swapping the checksum
    /// changes every boundary, so all splitters over a shared corpus must
    /// agree on it.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::{Buzhash32, SplitConfig, Splitter};
    ///
    /// let splitter = Splitter::with_hasher(SplitConfig::default(), Buzhash32::new());
    /// ```
    pub fn with_hasher(config: SplitConfig, hasher: H) -> Self {
        Self { config, hasher }
    }

    /// Returns the configuration used by this splitter.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Creates a splitting iterator from a reader.
    ///
    /// The iterator lazily reads from the reader and yields chunks as
    /// boundaries are found; the buffered tail is emitted as a final chunk
    /// at end of stream regardless of `min_size`. A reader error is yielded
    /// once as `Err` (discarding the partial chunk), after which the
    /// iterator is exhausted.
    pub fn split<R: Read>(self, reader: R) -> SplitIter<R, H> {
        SplitIter::new(reader, self.config, self.hasher, None)
    }

    /// Like [`split`](Splitter::split), but the split can be cancelled from
    /// another owner of the token.
    ///
    /// Cancellation is observed at the next byte boundary: the iterator
    /// yields [`SplitError::Cancelled`] once and drops any partially
    /// accumulated chunk.
    pub fn split_cancellable<R: Read>(self, reader: R, token: CancelToken) -> SplitIter<R, H> {
        SplitIter::new(reader, self.config, self.hasher, Some(token))
    }

    /// Splits an in-memory buffer.
    ///
    /// This is a convenience for data that is already in memory. Chunk data
    /// is zero-copy: each chunk's bytes are a [`Bytes::slice`] view of the
    /// input, which the tree builder (or any other consumer) can retain
    /// without copying.
    ///
    /// # Example
    ///
    /// ```
    /// use splitrs::{Splitter, SplitConfig};
    ///
    /// let splitter = Splitter::new(SplitConfig::default());
    /// let chunks = splitter.split_bytes(&b"hello world"[..]);
    /// assert_eq!(chunks.len(), 1);
    /// ```
    pub fn split_bytes(self, data: impl Into<Bytes>) -> Vec<Chunk> {
        let data = data.into();
        let mut engine = SplitEngine::new(self.config, self.hasher);
        let mut chunks = Vec::new();
        let mut start = 0usize;

        for (i, &byte) in data.iter().enumerate() {
            if let Some(level) = engine.roll(byte) {
                chunks.push(Chunk {
                    data: data.slice(start..i + 1),
                    level,
                    offset: start as u64,
                });
                start = i + 1;
            }
        }

        if start < data.len() {
            let level = engine.final_level();
            chunks.push(Chunk {
                data: data.slice(start..),
                level,
                offset: start as u64,
            });
        }

        chunks
    }
}

impl Default for Splitter<Cp32> {
    fn default() -> Self {
        Self::new(SplitConfig::default())
    }
}

/// An iterator that yields chunks from a reader.
///
/// `SplitIter` reads data from a [`std::io::Read`] source in 8 KiB blocks,
/// drains them byte-at-a-time through the boundary engine, and yields each
/// chunk as a fresh owned [`Bytes`] copy the moment its last byte is seen.
///
/// The sequence is single-pass and fused: after the final chunk, an `Err`,
/// or cancellation, `next` returns `None`.
pub struct SplitIter<R, H = Cp32> {
    reader: R,
    engine: SplitEngine<H>,

    /// Read-ahead block; bytes in `pos..filled` are not yet rolled.
    block: Box<[u8]>,
    pos: usize,
    filled: usize,

    /// Bytes of the chunk being accumulated.
    chunk_buf: Vec<u8>,
    offset: u64,

    cancel: Option<CancelToken>,
    finished: bool,
}

impl<R: Read, H: RollingHash> SplitIter<R, H> {
    fn new(reader: R, config: SplitConfig, hasher: H, cancel: Option<CancelToken>) -> Self {
        Self {
            reader,
            engine: SplitEngine::new(config, hasher),
            block: vec![0u8; READ_BLOCK].into_boxed_slice(),
            pos: 0,
            filled: 0,
            chunk_buf: Vec::new(),
            offset: 0,
            cancel,
            finished: false,
        }
    }

    /// Moves the accumulated buffer out as a chunk at the current offset.
    fn emit_chunk(&mut self, level: u32) -> Chunk {
        let data = Bytes::copy_from_slice(&self.chunk_buf);
        let chunk_offset = self.offset;
        self.offset += self.chunk_buf.len() as u64;
        self.chunk_buf.clear();

        Chunk {
            data,
            level,
            offset: chunk_offset,
        }
    }
}

impl<R: Read, H: RollingHash> Iterator for SplitIter<R, H> {
    type Item = Result<Chunk, SplitError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    self.finished = true;
                    return Some(Err(SplitError::Cancelled));
                }
            }

            // Drain the current block.
            while self.pos < self.filled {
                let byte = self.block[self.pos];
                self.pos += 1;
                self.chunk_buf.push(byte);
                if let Some(level) = self.engine.roll(byte) {
                    return Some(Ok(self.emit_chunk(level)));
                }
            }

            // Refill.
            match self.reader.read(&mut self.block) {
                Ok(0) => {
                    self.finished = true;
                    if self.chunk_buf.is_empty() {
                        return None;
                    }
                    let level = self.engine.final_level();
                    return Some(Ok(self.emit_chunk(level)));
                }
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}
