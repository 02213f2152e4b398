//! The default rolling checksum.
//!
//! A multiplicative rolling hash over the FNV prime: appending a byte
//! multiplies the running value by the prime and adds the byte; the byte
//! leaving the window is removed by subtracting it scaled by `prime^W`.
//! It is not a faithful Rabin-Karp, but its digest bits are well mixed,
//! which is the only property boundary detection needs.

use super::RollingHash;

/// Multiplier for the rolling hash (the 32-bit FNV prime).
const PRIME: u32 = 16_777_619;

/// The default rolling checksum: a 64-byte window, multiplicative prime
/// hash with 32-bit wrapping arithmetic.
///
/// The window is initialized to zero bytes, so the digest after the first
/// real byte is simply that byte's value. Boundary polarity throughout this
/// crate is **trailing zero bits of [`digest`]**: a boundary occurs where
/// `digest().trailing_zeros() >= split_bits`.
///
/// # Example
///
/// ```
/// use splitrs::{Cp32, RollingHash};
///
/// let mut rs = Cp32::new();
/// for &b in b"some stream of bytes" {
///     rs.roll(b);
/// }
/// let _boundary_signal = rs.digest().trailing_zeros();
/// ```
///
/// [`digest`]: RollingHash::digest
#[derive(Debug, Clone)]
pub struct Cp32 {
    /// Current checksum value.
    value: u32,

    /// `PRIME` raised to the window width (mod 2^32); scales the outgoing byte.
    pow_w: u32,

    /// The window contents, a ring buffer.
    window: Box<[u8]>,

    /// Index of the oldest byte in `window`.
    oldest: usize,
}

impl Cp32 {
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
        Self {
            value: 0,
            pow_w: PRIME.wrapping_pow(window_size as u32),
            window: vec![0u8; window_size].into_boxed_slice(),
            oldest: 0,
        }
    }

    /// Returns the window width in bytes.
    pub fn window_size(&self) -> usize {
        self.window.len()
    }
}

impl RollingHash for Cp32 {
    fn roll(&mut self, byte: u8) {
        let outgoing = self.window[self.oldest] as u32;
        self.value = self
            .value
            .wrapping_mul(PRIME)
            .wrapping_add(byte as u32)
            .wrapping_sub(self.pow_w.wrapping_mul(outgoing));
        self.window[self.oldest] = byte;
        self.oldest = (self.oldest + 1) % self.window.len();
    }

    fn digest(&self) -> u32 {
        self.value
    }

    fn reset(&mut self) {
        // A zero-filled window hashes to zero.
        self.value = 0;
        self.window.fill(0);
        self.oldest = 0;
    }
}

impl Default for Cp32 {
    fn default() -> Self {
        Self::new()
    }
}
