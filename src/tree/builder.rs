//! Incremental hashsplit tree construction.

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::error::SplitError;
use crate::tree::node::Node;

/// Error type a transform hook may return.
pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

type Transform = Box<dyn FnMut(Node) -> Result<Node, TransformError>>;

/// Assembles a (chunk, level) sequence into a hashsplit tree.
///
/// A hashsplit tree organizes the chunk list so that a localized edit of the
/// input changes only the tree nodes near the edit; subtrees away from it
/// are reused byte-identically. Chunk levels drive the shape: a level-`L`
/// chunk closes the `L` lowest currently-open nodes, each becoming a child
/// of the node one level up.
///
/// Feed chunks with [`add_chunk`] (or [`add`] for save-aside workflows),
/// then call [`finish`] to obtain the root. The natural level signal yields
/// an average branching factor of 2; for wider fan-out, divide levels by a
/// constant before adding.
///
/// # Example
///
/// ```
/// use splitrs::{SplitConfig, Splitter, TreeBuilder};
///
/// let data = vec![42u8; 10_000];
/// let mut builder = TreeBuilder::new();
/// for chunk in Splitter::new(SplitConfig::default()).split_bytes(data) {
///     builder.add_chunk(chunk)?;
/// }
/// let root = builder.finish()?.expect("non-empty input");
/// assert_eq!(root.size, 10_000);
/// assert_eq!(root.offset, 0);
/// # Ok::<(), splitrs::SplitError>(())
/// ```
///
/// [`add`]: TreeBuilder::add
/// [`add_chunk`]: TreeBuilder::add_chunk
/// [`finish`]: TreeBuilder::finish
#[derive(Default)]
pub struct TreeBuilder {
    /// Currently-open nodes, one per level, lowest first.
    open: Vec<Node>,

    /// Optional hook applied to every node as it closes.
    transform: Option<Transform>,

    /// Set once a transform fails; the builder is then unusable.
    poisoned: bool,
}

impl TreeBuilder {
    /// Creates an empty tree builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tree builder with a per-node transform hook.
    ///
    /// The hook runs exactly once per node of the returned tree, at the
    /// moment the node closes (becomes a child of its parent), and for the
    /// root at [`finish`]. Parents always close after all their children,
    /// so a hook may durably store each node knowing its children were
    /// already handled. A common use is the save-aside workflow: replace a
    /// leaf's `chunks` entries with storage keys while leaving `size` and
    /// `offset` untouched.
    ///
    /// If the hook fails, the error is surfaced as
    /// [`SplitError::Transform`] and the builder becomes unusable.
    ///
    /// [`finish`]: TreeBuilder::finish
    pub fn with_transform(
        transform: impl FnMut(Node) -> Result<Node, TransformError> + 'static,
    ) -> Self {
        Self {
            open: Vec::new(),
            transform: Some(Box::new(transform)),
            poisoned: false,
        }
    }

    /// Adds a split chunk to the tree.
    ///
    /// Equivalent to `add(chunk.data, chunk.len() as u64, chunk.level)`.
    pub fn add_chunk(&mut self, chunk: Chunk) -> Result<(), SplitError> {
        let size = chunk.len() as u64;
        self.add(chunk.data, size, chunk.level)
    }

    /// Adds a chunk to the tree, with `size` decoupled from `bytes`.
    ///
    /// Normally `size` is `bytes.len()`. Callers that save each chunk aside
    /// to separate storage pass the lookup key as `bytes` and the original
    /// chunk length as `size`, keeping every node's `size` and `offset`
    /// correct with respect to the original data.
    ///
    /// The chunk's level is normally the level reported by the splitter.
    /// Passing `level / k` for a constant `k` produces a wider, shallower
    /// tree.
    pub fn add(&mut self, bytes: Bytes, size: u64, level: u32) -> Result<(), SplitError> {
        if self.poisoned {
            return Err(SplitError::Transform("tree builder already failed".into()));
        }
        if self.open.is_empty() {
            self.open.push(Node {
                level: 0,
                children: Vec::new(),
                chunks: Vec::new(),
                size: 0,
                offset: 0,
            });
        }

        self.open[0].chunks.push(bytes);
        for node in &mut self.open {
            node.size += size;
        }

        for i in 0..level as usize {
            if i + 1 == self.open.len() {
                // A new top level absorbs everything its first child already
                // covers and starts at the beginning of the stream.
                let top = &self.open[i];
                let next = Node {
                    level: top.level + 1,
                    children: Vec::new(),
                    chunks: Vec::new(),
                    size: top.size,
                    offset: 0,
                };
                self.open.push(next);
            }

            let successor_offset = self.open[i + 1].offset + self.open[i + 1].size;
            let fresh = Node {
                level: i as u32,
                children: Vec::new(),
                chunks: Vec::new(),
                size: 0,
                offset: successor_offset,
            };
            let closed = std::mem::replace(&mut self.open[i], fresh);
            let closed = self.close(closed)?;
            self.open[i + 1].children.push(closed);
        }

        Ok(())
    }

    /// Completes the tree and returns its root.
    ///
    /// Remaining open nodes are attached upward, singleton chains at the top
    /// are collapsed, and the root is returned. Returns `Ok(None)` if no
    /// chunk was ever added.
    ///
    /// # Errors
    ///
    /// Returns [`SplitError::Transform`] if the transform hook fails (or
    /// already failed earlier).
    pub fn finish(mut self) -> Result<Option<Node>, SplitError> {
        if self.poisoned {
            return Err(SplitError::Transform("tree builder already failed".into()));
        }
        if self.open.is_empty() {
            return Ok(None);
        }

        // Attach every non-empty open node to the level above. An empty
        // level 0 (the last chunk's own level closed it) is skipped without
        // dropping the still-open interior nodes above it.
        for i in 0..self.open.len() - 1 {
            if self.open[i].chunks.is_empty() && self.open[i].children.is_empty() {
                continue;
            }
            let placeholder = Node {
                level: i as u32,
                children: Vec::new(),
                chunks: Vec::new(),
                size: 0,
                offset: 0,
            };
            let closed = std::mem::replace(&mut self.open[i], placeholder);
            let closed = self.close(closed)?;
            self.open[i + 1].children.push(closed);
        }

        let mut root = self.open.pop().expect("open is non-empty");
        let mut descended = false;
        while root.children.len() == 1 {
            root = root.children.pop().expect("len checked");
            descended = true;
        }

        // A root reached by descending was already transformed when it
        // closed; the undescended top never was.
        if !descended {
            root = self.close(root)?;
        }
        Ok(Some(root))
    }

    fn close(&mut self, node: Node) -> Result<Node, SplitError> {
        let Some(transform) = self.transform.as_mut() else {
            return Ok(node);
        };
        match transform(node) {
            Ok(node) => Ok(node),
            Err(e) => {
                self.poisoned = true;
                Err(SplitError::Transform(e))
            }
        }
    }
}

impl std::fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("open", &self.open)
            .field("transform", &self.transform.is_some())
            .field("poisoned", &self.poisoned)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk10(tag: u8) -> Bytes {
        Bytes::from(vec![tag; 10])
    }

    fn add10(builder: &mut TreeBuilder, tag: u8, level: u32) {
        builder.add(chunk10(tag), 10, level).unwrap();
    }

    #[test]
    fn test_empty_stream_has_no_tree() {
        assert!(TreeBuilder::new().finish().unwrap().is_none());
    }

    #[test]
    fn test_single_chunk_is_a_leaf_root() {
        let mut builder = TreeBuilder::new();
        add10(&mut builder, b'a', 0);
        let root = builder.finish().unwrap().unwrap();

        assert_eq!(root.level, 0);
        assert!(root.is_leaf());
        assert_eq!(root.chunks, vec![chunk10(b'a')]);
        assert_eq!(root.size, 10);
        assert_eq!(root.offset, 0);
    }

    #[test]
    fn test_hand_computed_shape() {
        // Levels [1, 0, 2, 0] over 10-byte chunks: the level-2 chunk closes
        // both lower levels, the trailing level-0 chunk opens a new branch.
        let mut builder = TreeBuilder::new();
        add10(&mut builder, b'a', 1);
        add10(&mut builder, b'b', 0);
        add10(&mut builder, b'c', 2);
        add10(&mut builder, b'd', 0);
        let root = builder.finish().unwrap().unwrap();

        assert_eq!(root.level, 2);
        assert_eq!(root.size, 40);
        assert_eq!(root.offset, 0);
        assert_eq!(root.children.len(), 2);

        let left = &root.children[0];
        assert_eq!((left.level, left.offset, left.size), (1, 0, 30));
        assert_eq!(left.children.len(), 2);
        assert_eq!(
            (left.children[0].offset, left.children[0].size),
            (0, 10)
        );
        assert_eq!(left.children[0].chunks, vec![chunk10(b'a')]);
        assert_eq!(
            (left.children[1].offset, left.children[1].size),
            (10, 20)
        );
        assert_eq!(left.children[1].chunks, vec![chunk10(b'b'), chunk10(b'c')]);

        let right = &root.children[1];
        assert_eq!((right.level, right.offset, right.size), (1, 30, 10));
        assert_eq!(right.children.len(), 1);
        assert_eq!(right.children[0].chunks, vec![chunk10(b'd')]);
    }

    #[test]
    fn test_trailing_high_level_chunk_keeps_data() {
        // The last chunk's level closes level 0; everything must still be
        // reachable from the root.
        let mut builder = TreeBuilder::new();
        add10(&mut builder, b'a', 0);
        add10(&mut builder, b'b', 2);
        let root = builder.finish().unwrap().unwrap();

        assert_eq!(root.size, 20);
        let joined: Vec<u8> = root
            .leaf_chunks()
            .flat_map(|b| b.iter().copied())
            .collect();
        let mut expected = vec![b'a'; 10];
        expected.extend(vec![b'b'; 10]);
        assert_eq!(joined, expected);

        // The singleton chain above the only leaf collapses away.
        assert_eq!(root.level, 0);
    }

    #[test]
    fn test_interior_trailing_subtree_is_attached() {
        // First chunk opens levels up to 2, the final chunk closes only
        // level 0; the level-1 subtree holding it must be attached upward.
        let mut builder = TreeBuilder::new();
        add10(&mut builder, b'a', 2);
        add10(&mut builder, b'b', 1);
        let root = builder.finish().unwrap().unwrap();

        assert_eq!(root.level, 2);
        assert_eq!(root.size, 20);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[1].offset, 10);

        let joined: Vec<u8> = root
            .leaf_chunks()
            .flat_map(|b| b.iter().copied())
            .collect();
        assert_eq!(joined.len(), 20);
        assert_eq!(&joined[10..], &vec![b'b'; 10][..]);
    }

    #[test]
    fn test_pruning_singleton_root() {
        // All chunks level 0: the tree is a single leaf, no interior nodes.
        let mut builder = TreeBuilder::new();
        add10(&mut builder, b'a', 0);
        add10(&mut builder, b'b', 0);
        let root = builder.finish().unwrap().unwrap();
        assert_eq!(root.level, 0);
        assert_eq!(root.chunks.len(), 2);
    }

    #[test]
    fn test_save_aside_sizes() {
        // Store 3-byte keys but report original 10-byte sizes.
        let mut builder = TreeBuilder::new();
        builder.add(Bytes::from_static(b"k01"), 10, 1).unwrap();
        builder.add(Bytes::from_static(b"k02"), 10, 0).unwrap();
        let root = builder.finish().unwrap().unwrap();

        assert_eq!(root.size, 20);
        assert_eq!(root.children[1].offset, 10);
    }

    #[test]
    fn test_transform_failure_poisons_builder() {
        let mut builder = TreeBuilder::with_transform(|_node| Err("hook refused".into()));
        // The first cascade triggers the transform.
        builder.add(chunk10(b'a'), 10, 0).unwrap();
        let err = builder.add(chunk10(b'b'), 10, 1).unwrap_err();
        assert!(matches!(err, SplitError::Transform(_)));

        let err = builder.add(chunk10(b'c'), 10, 0).unwrap_err();
        assert!(matches!(err, SplitError::Transform(_)));
    }

    #[test]
    fn test_transform_runs_once_per_node() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_hook = Rc::clone(&seen);
        let mut builder = TreeBuilder::with_transform(move |node| {
            seen_hook.borrow_mut().push((node.level, node.offset));
            Ok(node)
        });

        add10(&mut builder, b'a', 1);
        add10(&mut builder, b'b', 0);
        let root = builder.finish().unwrap().unwrap();

        // Children close before their parent; the root is transformed last.
        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (0, 0));
        assert_eq!(seen[1], (0, 10));
        assert_eq!(*seen.last().unwrap(), (root.level, root.offset));
    }
}
