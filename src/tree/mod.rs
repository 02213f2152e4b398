//! Hashsplit tree assembly.
//!
//! - [`Node`] - A node in the hashsplit tree, with offset-indexed lookup
//! - [`TreeBuilder`] - Folds a (chunk, level) sequence into a tree
//! - [`LeafChunks`] - Depth-first iterator over a tree's chunk slices

mod builder;
mod node;

pub use builder::{TransformError, TreeBuilder};
pub use node::{LeafChunks, Node};
