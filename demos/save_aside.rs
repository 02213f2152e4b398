//! Save-aside hashsplit tree example.
//!
//! Splits generated data, stores every chunk in a content-addressed map
//! keyed by its blake3 hash, and keeps only the 32-byte keys in the tree.
//! The tree's sizes and offsets keep describing the original stream, so
//! seeking by input position still works, and the stream is recoverable
//! from the store.
//!
//! Run with:
//!     cargo run --example save_aside

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use bytes::Bytes;
use splitrs::{SplitConfig, Splitter, TreeBuilder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data: Vec<u8> = {
        let mut seed = 7u64;
        (0..512 * 1024)
            .map(|_| {
                seed = seed
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                (seed >> 33) as u8
            })
            .collect()
    };

    let store: Rc<RefCell<HashMap<[u8; 32], Bytes>>> = Rc::new(RefCell::new(HashMap::new()));
    let store_hook = Rc::clone(&store);

    let mut builder = TreeBuilder::with_transform(move |mut node| {
        if node.is_leaf() {
            let mut keys = Vec::with_capacity(node.chunks.len());
            for chunk in node.chunks.drain(..) {
                let key: [u8; 32] = blake3::hash(&chunk).into();
                store_hook.borrow_mut().insert(key, chunk);
                keys.push(Bytes::copy_from_slice(&key));
            }
            node.chunks = keys;
        }
        Ok(node)
    });

    let splitter = Splitter::new(SplitConfig::default());
    for chunk in splitter.split_bytes(data.clone()) {
        builder.add_chunk(chunk)?;
    }
    let root = builder.finish()?.expect("non-empty input");

    println!(
        "tree covers {} bytes, {} chunks stored",
        root.size,
        store.borrow().len()
    );

    // Random access by original position, through the key-bearing tree.
    let pos = data.len() as u64 / 2;
    let leaf = root.seek(pos)?;
    println!(
        "position {} lives in leaf [{}, {}) holding {} keys",
        pos,
        leaf.offset,
        leaf.offset + leaf.size,
        leaf.chunks.len()
    );

    // Full recovery from the store.
    let mut recovered = Vec::with_capacity(data.len());
    for key in root.leaf_chunks() {
        let key: [u8; 32] = key.as_ref().try_into()?;
        recovered.extend_from_slice(&store.borrow()[&key]);
    }
    assert_eq!(recovered, data);
    println!("recovered {} bytes from the store", recovered.len());

    Ok(())
}
