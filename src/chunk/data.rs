//! Chunk data representation.

use bytes::Bytes;
use std::fmt;

/// A content-defined chunk with metadata.
///
/// Contains:
/// - Data ([`Bytes`]) - the chunk's bytes, owned by the chunk
/// - Level (`u32`) - how strongly the boundary condition held at the chunk's
///   end: the number of trailing zero bits in the rolling checksum beyond
///   `split_bits`. Forced (max-size) cuts and a final chunk that met no
///   boundary report level 0.
/// - Offset (`u64`) - byte position of the chunk's first byte in the stream
///
/// Concatenating chunk data in emission order reproduces the input exactly;
/// no emitted chunk is empty.
///
/// # Example
///
/// ```
/// use splitrs::Chunk;
///
/// let chunk = Chunk::new(&b"hello world"[..], 0);
/// assert_eq!(chunk.len(), 11);
/// assert_eq!(chunk.level(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk data.
    pub data: Bytes,

    /// Trailing checksum bits beyond the split threshold at the boundary.
    pub level: u32,

    /// The offset in the original stream.
    pub offset: u64,
}

impl Chunk {
    /// Creates a new chunk with the given data and level, at offset 0.
    pub fn new(data: impl Into<Bytes>, level: u32) -> Self {
        Self {
            data: data.into(),
            level,
            offset: 0,
        }
    }

    /// Creates a new chunk with an explicit stream offset.
    pub fn with_offset(data: impl Into<Bytes>, level: u32, offset: u64) -> Self {
        Self {
            data: data.into(),
            level,
            offset,
        }
    }

    /// Returns the length of the chunk data.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the chunk contains no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk data.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the chunk's level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Returns the offset of the chunk's first byte in the original stream.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the end offset of the chunk (exclusive).
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }

    /// Returns the chunk as a range `[offset, end)`.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.offset..self.end()
    }

    /// Consumes the chunk and returns the underlying data.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunk({} bytes @ {}, level {})",
            self.len(),
            self.offset,
            self.level
        )
    }
}
