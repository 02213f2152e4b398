//! Per-byte boundary state machine.
//!
//! `SplitEngine` couples a rolling checksum with the boundary rules: minimum
//! size suppression, the trailing-zero-bits test, max-size forced cuts, and
//! level computation. The surrounding iterator/stream owns the chunk bytes;
//! the engine only decides where chunks end.

use crate::config::SplitConfig;
use crate::rolling::RollingHash;

/// Boundary detection state for one stream.
#[derive(Debug, Clone)]
pub(crate) struct SplitEngine<H> {
    hasher: H,
    split_bits: u32,
    min_size: usize,
    max_size: usize,
    reset_between_chunks: bool,

    /// Bytes accumulated in the current chunk so far.
    chunk_len: usize,
}

impl<H: RollingHash> SplitEngine<H> {
    pub(crate) fn new(config: SplitConfig, hasher: H) -> Self {
        Self {
            hasher,
            split_bits: config.split_bits(),
            min_size: config.min_size(),
            max_size: config.max_size(),
            reset_between_chunks: config.reset_between_chunks(),
            chunk_len: 0,
        }
    }

    /// Rolls one byte into the current chunk.
    ///
    /// Returns `Some(level)` if this byte ends the chunk. A natural boundary
    /// (enough trailing zero bits) wins over a max-size cut on the same
    /// byte; forced cuts report level 0.
    pub(crate) fn roll(&mut self, byte: u8) -> Option<u32> {
        self.chunk_len += 1;
        self.hasher.roll(byte);

        if self.chunk_len < self.min_size {
            return None;
        }

        let tz = self.hasher.digest().trailing_zeros();
        if tz >= self.split_bits {
            self.end_chunk();
            return Some(tz - self.split_bits);
        }

        if self.max_size > 0 && self.chunk_len >= self.max_size {
            self.end_chunk();
            return Some(0);
        }

        None
    }

    /// Level of the final chunk at end of stream.
    ///
    /// The final chunk is emitted regardless of `min_size`; it carries a
    /// boundary level only if the digest happens to satisfy the boundary
    /// condition, and 0 otherwise.
    pub(crate) fn final_level(&mut self) -> u32 {
        let tz = self.hasher.digest().trailing_zeros();
        let level = if tz >= self.split_bits {
            tz - self.split_bits
        } else {
            0
        };
        self.end_chunk();
        level
    }

    fn end_chunk(&mut self) {
        self.chunk_len = 0;
        if self.reset_between_chunks {
            self.hasher.reset();
        }
    }
}
