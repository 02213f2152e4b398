#![no_main]

use libfuzzer_sys::fuzz_target;
use splitrs::{SplitConfig, Splitter};

fuzz_target!(|data: Vec<u8>| {
    // Test with various split configurations
    let configs = vec![
        // Tiny chunks, no minimum
        SplitConfig::new(4, 1, 0).unwrap(),
        // Window-sized minimum
        SplitConfig::new(8, 64, 0).unwrap(),
        // Capped chunks
        SplitConfig::new(6, 16, 256).unwrap(),
        // Independent chunks
        SplitConfig::new(8, 64, 0)
            .unwrap()
            .with_reset_between_chunks(true),
        // Default config
        SplitConfig::default(),
    ];

    for config in configs {
        let splitter = Splitter::new(config);
        let chunks = splitter.split_bytes(data.clone());

        // Verify: no chunk is empty, sizes respect the configured bounds
        for (i, chunk) in chunks.iter().enumerate() {
            assert!(!chunk.is_empty());
            if config.max_size() > 0 {
                assert!(chunk.len() <= config.max_size());
            }
            // Only enforce min_size for chunks that are not the last one
            if i < chunks.len() - 1 {
                assert!(chunk.len() >= config.min_size());
            }
        }

        // Verify: concatenation reproduces the input
        let joined: Vec<u8> = chunks.iter().flat_map(|c| c.data.to_vec()).collect();
        assert_eq!(joined, data);

        // Verify: offsets are cumulative
        let mut expected_offset = 0u64;
        for chunk in &chunks {
            assert_eq!(chunk.offset, expected_offset);
            expected_offset += chunk.len() as u64;
        }

        // Verify: determinism - same input produces same chunks
        let splitter2 = Splitter::new(config);
        let chunks2 = splitter2.split_bytes(data.clone());
        assert_eq!(chunks, chunks2);
    }
});
