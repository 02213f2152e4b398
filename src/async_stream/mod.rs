//! Async streaming support for splitting.
//!
//! This module provides asynchronous splitting using the
//! `futures-io::AsyncRead` trait, making it runtime-agnostic and compatible
//! with tokio, async-std, smol, and other async runtimes.
//!
//! - [`split_async`] - Creates an async stream of chunks from an async reader
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{split_async, SplitStream};
