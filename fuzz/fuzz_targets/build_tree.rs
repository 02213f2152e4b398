#![no_main]

use libfuzzer_sys::fuzz_target;
use splitrs::{Node, SplitConfig, Splitter, TreeBuilder};

fn check_node(node: &Node) {
    assert!(node.children.is_empty() || node.chunks.is_empty());

    if node.children.is_empty() {
        let total: u64 = node.chunks.iter().map(|c| c.len() as u64).sum();
        assert_eq!(node.size, total);
        return;
    }

    let total: u64 = node.children.iter().map(|c| c.size).sum();
    assert_eq!(node.size, total);

    let mut offset = node.offset;
    for child in &node.children {
        assert_eq!(child.offset, offset);
        offset += child.size;
        check_node(child);
    }
}

fuzz_target!(|data: Vec<u8>| {
    // Small chunks so even short inputs exercise multi-level trees
    let config = SplitConfig::new(4, 1, 0).unwrap();
    let chunks = Splitter::new(config).split_bytes(data.clone());

    let mut builder = TreeBuilder::new();
    for chunk in chunks {
        builder.add_chunk(chunk).unwrap();
    }
    let root = builder.finish().unwrap();

    if data.is_empty() {
        assert!(root.is_none());
        return;
    }

    let root = root.unwrap();

    // Verify: coverage, pruning, structural invariants
    assert_eq!(root.offset, 0);
    assert_eq!(root.size, data.len() as u64);
    assert!(root.level == 0 || root.children.len() >= 2);
    check_node(&root);

    // Verify: walking the tree reproduces the input
    let joined: Vec<u8> = root.leaf_chunks().flat_map(|b| b.to_vec()).collect();
    assert_eq!(joined, data);

    // Verify: seek agrees with the chunk layout at a few probes
    for pos in [0, data.len() as u64 / 2, data.len() as u64 - 1] {
        let leaf = root.seek(pos).unwrap();
        assert!(leaf.offset <= pos && pos < leaf.offset + leaf.size);
    }
    assert!(root.seek(data.len() as u64).is_err());
});
