//! Cyclic-polynomial (buzhash) rolling checksum.
//!
//! An alternative to the default [`Cp32`] checksum built on bit rotation and
//! XOR against a byte-substitution table. Swappable into the splitter via
//! [`Splitter::with_hasher`]; note that changing the checksum changes every
//! chunk boundary, so the two must not be mixed over the same corpus.
//!
//! [`Cp32`]: super::Cp32
//! [`Splitter::with_hasher`]: crate::Splitter::with_hasher

use std::sync::OnceLock;

use super::RollingHash;

/// Substitution table mapping each byte to a well-mixed 32-bit value.
fn byte_table() -> &'static [u32; 256] {
    static TABLE: OnceLock<[u32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        // Simple LCG seeded from the golden ratio for good distribution
        let mut seed: u64 = 0x9e3779b97f4a7c15;
        for item in &mut table {
            // LCG parameters from Numerical Recipes
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            *item = (seed >> 32) as u32;
        }
        table
    })
}

/// A buzhash-style rolling checksum.
///
/// Each step rotates the running hash left by one bit, XORs in the table
/// value of the incoming byte, and cancels the outgoing byte by XORing its
/// table value rotated by the window width. Same contract and boundary
/// polarity as [`Cp32`]: boundaries come from trailing zero bits of the
/// digest.
///
/// [`Cp32`]: super::Cp32
#[derive(Debug, Clone)]
pub struct Buzhash32 {
    /// Current checksum value.
    hash: u32,

    /// Rotation applied to an outgoing byte's table value (window width mod 32).
    out_rot: u32,

    /// The window contents, a ring buffer.
    window: Box<[u8]>,

    /// Index of the oldest byte in `window`.
    oldest: usize,
}

impl Buzhash32 {
    /// The default window width in bytes.
    pub const WINDOW_SIZE: usize = 64;

    /// Creates a checksum with the default 64-byte window.
    pub fn new() -> Self {
        Self::with_window(Self::WINDOW_SIZE)
    }

    /// Creates a checksum with a custom window width.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    pub fn with_window(window_size: usize) -> Self {
        assert!(window_size > 0, "window size must be non-zero");
        let mut h = Self {
            hash: 0,
            out_rot: (window_size % 32) as u32,
            window: vec![0u8; window_size].into_boxed_slice(),
            oldest: 0,
        };
        h.hash = h.zero_window_hash();
        h
    }

    /// Returns the window width in bytes.
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// Hash of an all-zero window, the initialization state.
    fn zero_window_hash(&self) -> u32 {
        let zero = byte_table()[0];
        let mut h = 0u32;
        for _ in 0..self.window.len() {
            h = h.rotate_left(1) ^ zero;
        }
        h
    }
}

impl RollingHash for Buzhash32 {
    fn roll(&mut self, byte: u8) {
        let table = byte_table();
        let outgoing = self.window[self.oldest];
        self.hash = self.hash.rotate_left(1)
            ^ table[outgoing as usize].rotate_left(self.out_rot)
            ^ table[byte as usize];
        self.window[self.oldest] = byte;
        self.oldest = (self.oldest + 1) % self.window.len();
    }

    fn digest(&self) -> u32 {
        self.hash
    }

    fn reset(&mut self) {
        self.window.fill(0);
        self.oldest = 0;
        self.hash = self.zero_window_hash();
    }
}

impl Default for Buzhash32 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_depends_only_on_window() {
        let suffix: Vec<u8> = (0u32..Buzhash32::WINDOW_SIZE as u32)
            .map(|i| (i * 13 + 5) as u8)
            .collect();

        let mut a = Buzhash32::new();
        for &b in b"prefix one" {
            a.roll(b);
        }
        for &b in &suffix {
            a.roll(b);
        }

        let mut b = Buzhash32::new();
        for &byte in b"an unrelated prefix of different length entirely" {
            b.roll(byte);
        }
        for &byte in &suffix {
            b.roll(byte);
        }

        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_reset_matches_fresh() {
        let mut rolled = Buzhash32::new();
        for &b in b"discard me" {
            rolled.roll(b);
        }
        rolled.reset();

        let fresh = Buzhash32::new();
        assert_eq!(rolled.digest(), fresh.digest());
    }

    #[test]
    fn test_rolling_matches_direct() {
        // Rolling through arbitrary data and then a full window of known
        // bytes must equal hashing just that window from scratch.
        let window: Vec<u8> = (0..Buzhash32::WINDOW_SIZE as u32)
            .map(|i| (i * 7 + 3) as u8)
            .collect();

        let mut rolled = Buzhash32::new();
        for &b in b"leading noise bytes" {
            rolled.roll(b);
        }
        for &b in &window {
            rolled.roll(b);
        }

        let mut direct = Buzhash32::new();
        for &b in &window {
            direct.roll(b);
        }

        assert_eq!(rolled.digest(), direct.digest());
    }

    #[test]
    fn test_bit_balance_over_random_input() {
        use rand::{Rng, SeedableRng};

        let mut rng = rand::rngs::StdRng::seed_from_u64(0xb422);
        let mut rs = Buzhash32::new();
        for _ in 0..Buzhash32::WINDOW_SIZE {
            rs.roll(rng.gen());
        }

        const SAMPLES: u32 = 200_000;
        let mut ones = [0u32; 32];
        for _ in 0..SAMPLES {
            rs.roll(rng.gen());
            let d = rs.digest();
            for (bit, count) in ones.iter_mut().enumerate() {
                *count += (d >> bit) & 1;
            }
        }

        for (bit, &count) in ones.iter().enumerate() {
            let freq = count as f64 / SAMPLES as f64;
            assert!(
                (0.47..=0.53).contains(&freq),
                "bit {} frequency {} outside tolerance",
                bit,
                freq
            );
        }
    }
}
