// Reference-shape tests for the default configuration.
//
// These pin the exact chunk sequence and tree shape the default Cp32
// checksum produces over a fixed generated input, so any change to the
// checksum, the boundary rules, or the tree construction shows up as a
// diff here. The values were produced by an independent implementation
// of the same recurrences and cross-checked for tiling and coverage.

use std::io::Cursor;

use splitrs::{split_to_tree, SplitConfig, SplitError, Splitter};

const LEN: usize = 150_000;
const SEED: u64 = 0xE3;

/// (length, level) of every chunk the default config emits over the
/// reference input, in order.
const CHUNKS: [(usize, u32); 33] = [
    (3_685, 1),
    (1_730, 0),
    (10_112, 1),
    (5_655, 2),
    (472, 5),
    (5_084, 1),
    (2_224, 4),
    (7_131, 0),
    (1_112, 0),
    (3_324, 0),
    (885, 1),
    (700, 0),
    (11_484, 0),
    (2_655, 0),
    (287, 1),
    (6_878, 0),
    (7_142, 2),
    (4_004, 0),
    (358, 0),
    (2_704, 2),
    (14_315, 1),
    (1_780, 3),
    (3_332, 2),
    (2_874, 0),
    (4_415, 1),
    (6_392, 1),
    (2_310, 1),
    (14_470, 1),
    (9_762, 0),
    (7_243, 0),
    (1_214, 5),
    (1_794, 0),
    (2_473, 0),
];

fn reference_input() -> Vec<u8> {
    let mut seed = SEED;
    (0..LEN)
        .map(|_| {
            seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (seed >> 33) as u8
        })
        .collect()
}

#[test]
fn test_reference_chunk_sequence() {
    let data = reference_input();
    let chunks = Splitter::new(SplitConfig::default()).split_bytes(data);

    assert_eq!(chunks.len(), CHUNKS.len(), "chunk count changed");

    let mut offset = 0u64;
    for (i, (chunk, &(len, level))) in chunks.iter().zip(CHUNKS.iter()).enumerate() {
        assert_eq!(chunk.len(), len, "chunk {} length", i);
        assert_eq!(chunk.level, level, "chunk {} level", i);
        assert_eq!(chunk.offset, offset, "chunk {} offset", i);
        offset += len as u64;
    }
    assert_eq!(offset, LEN as u64);
}

#[test]
fn test_reference_tree_shape() {
    let data = reference_input();
    let root = split_to_tree(Cursor::new(&data), SplitConfig::default())
        .unwrap()
        .unwrap();

    assert_eq!(root.level, 5);
    assert_eq!(root.offset, 0);
    assert_eq!(root.size, LEN as u64);

    let top: Vec<(u64, u64)> = root.children.iter().map(|n| (n.offset, n.size)).collect();
    assert_eq!(
        top,
        vec![(0, 21_654), (21_654, 124_079), (145_733, 4_267)]
    );
    for child in &root.children {
        assert_eq!(child.level, 4);
    }

    // The middle subtree carries the bulk of the stream.
    let middle = &root.children[1];
    let middle_shape: Vec<(u64, u64)> = middle
        .children
        .iter()
        .map(|n| (n.offset, n.size))
        .collect();
    assert_eq!(middle_shape, vec![(21_654, 7_308), (28_962, 116_771)]);

    let bulk = &middle.children[1];
    let bulk_shape: Vec<(u64, u64)> = bulk.children.iter().map(|n| (n.offset, n.size)).collect();
    assert_eq!(bulk_shape, vec![(28_962, 64_759), (93_721, 52_012)]);
}

#[test]
fn test_reference_seek_endpoints() {
    let data = reference_input();
    let root = split_to_tree(Cursor::new(&data), SplitConfig::default())
        .unwrap()
        .unwrap();

    let first = root.seek(0).unwrap();
    assert_eq!((first.offset, first.size), (0, 3_685));
    assert_eq!(first.chunks.len(), 1);

    let last = root.seek(LEN as u64 - 1).unwrap();
    assert_eq!((last.offset, last.size), (145_733, 4_267));
    assert_eq!(last.chunks.len(), 2);

    let mid = root.seek(100_000).unwrap();
    assert_eq!((mid.offset, mid.size), (97_053, 7_289));
    assert_eq!(mid.chunks.len(), 2);

    assert!(matches!(
        root.seek(LEN as u64),
        Err(SplitError::NotFound { pos: 150_000 })
    ));
    assert!(root.seek(200_000).is_err());
}
