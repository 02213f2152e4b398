//! Async stream adapter for splitting.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use splitrs::{split_async, SplitConfig};
//! use futures_io::AsyncRead;
//!
//! async fn demo<R: AsyncRead + Unpin>(reader: R) -> Result<(), splitrs::SplitError> {
//!     let mut stream = split_async(reader, SplitConfig::default());
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk: {} bytes, level {}", chunk.len(), chunk.level);
//!     }
//!     Ok(())
//! }
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::AsyncRead;
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::SplitConfig;
use crate::error::SplitError;
use crate::rolling::{Cp32, RollingHash};
use crate::splitter::SplitEngine;

/// Read granularity, matching the sync iterator.
const READ_BLOCK: usize = 8 * 1024;

pin_project! {
    /// A stream that yields chunks from an async reader.
    ///
    /// This uses `futures_io::AsyncRead`, which is runtime-agnostic: it
    /// works with tokio (via `tokio_util::compat`), async-std, smol, or any
    /// futures-compatible runtime. Semantics match [`SplitIter`]: chunks are
    /// fresh owned copies, the buffered tail is emitted at end of stream,
    /// and a read error is yielded once (discarding the partial chunk)
    /// before the stream fuses.
    ///
    /// [`SplitIter`]: crate::SplitIter
    pub struct SplitStream<R, H> {
        #[pin]
        reader: R,
        engine: SplitEngine<H>,

        // Read-ahead block; bytes in pos..filled are not yet rolled.
        block: Box<[u8]>,
        pos: usize,
        filled: usize,

        chunk_buf: Vec<u8>,
        offset: u64,
        finished: bool,
    }
}

impl<R, H: RollingHash> SplitStream<R, H> {
    /// Creates a split stream with a custom rolling checksum.
    pub fn with_hasher(reader: R, config: SplitConfig, hasher: H) -> Self {
        Self {
            reader,
            engine: SplitEngine::new(config, hasher),
            block: vec![0u8; READ_BLOCK].into_boxed_slice(),
            pos: 0,
            filled: 0,
            chunk_buf: Vec::new(),
            offset: 0,
            finished: false,
        }
    }
}

/// Moves the accumulated buffer out as a chunk at the current offset.
fn emit_chunk(chunk_buf: &mut Vec<u8>, offset: &mut u64, level: u32) -> Chunk {
    let data = Bytes::copy_from_slice(chunk_buf);
    let chunk_offset = *offset;
    *offset += chunk_buf.len() as u64;
    chunk_buf.clear();

    Chunk {
        data,
        level,
        offset: chunk_offset,
    }
}

impl<R: AsyncRead, H: RollingHash> Stream for SplitStream<R, H> {
    type Item = Result<Chunk, SplitError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            // Drain the current block.
            while *this.pos < *this.filled {
                let byte = this.block[*this.pos];
                *this.pos += 1;
                this.chunk_buf.push(byte);
                if let Some(level) = this.engine.roll(byte) {
                    let chunk = emit_chunk(this.chunk_buf, this.offset, level);
                    return Poll::Ready(Some(Ok(chunk)));
                }
            }

            // Refill.
            match this.reader.as_mut().poll_read(cx, this.block) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Err(e)) => {
                    *this.finished = true;
                    return Poll::Ready(Some(Err(e.into())));
                }
                Poll::Ready(Ok(0)) => {
                    *this.finished = true;
                    if this.chunk_buf.is_empty() {
                        return Poll::Ready(None);
                    }
                    let level = this.engine.final_level();
                    let chunk = emit_chunk(this.chunk_buf, this.offset, level);
                    return Poll::Ready(Some(Ok(chunk)));
                }
                Poll::Ready(Ok(n)) => {
                    *this.pos = 0;
                    *this.filled = n;
                }
            }
        }
    }
}

/// Creates a chunk stream from an async reader with the default checksum.
///
/// Uses `futures_io::AsyncRead` for runtime-agnostic async I/O. Tokio users
/// can adapt a `tokio::io::AsyncRead` with `tokio_util::compat`:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use splitrs::{split_async, SplitConfig};
///
/// let file = tokio::fs::File::open("data.bin").await?;
/// let stream = split_async(file.compat(), SplitConfig::default());
/// ```
///
/// # Arguments
///
/// * `reader` - An async reader implementing `AsyncRead`
/// * `config` - The splitting configuration
///
/// # Returns
///
/// A [`SplitStream`] implementing `Stream<Item = Result<Chunk, SplitError>>`
pub fn split_async<R: AsyncRead>(reader: R, config: SplitConfig) -> SplitStream<R, Cp32> {
    SplitStream::with_hasher(reader, config, Cp32::new())
}
