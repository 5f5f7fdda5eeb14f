//======================================================================
// src/consts.rs
// Cipher-level sizes and counts.
//======================================================================

/// Key size in bytes (512 bits).
pub const KEY_SIZE: usize = 64;

/// Plaintext/ciphertext block size in bytes (256 bits).
pub const BLOCK_SIZE: usize = 32;

/// Size of one state register in bytes (512 bits).
pub const REGISTER_SIZE: usize = 64;

/// Number of state registers.
pub const REGISTER_COUNT: usize = 7;

/// Accumulator size in bytes. Only the leading 8 bytes carry the running
/// sum; the rest stays zero.
pub const ACCUMULATOR_SIZE: usize = 128;

/// IV size in bytes (256 bits).
pub const IV_SIZE: usize = 32;

/// Number of rounds per block.
pub const ROUNDS: usize = 24;

/// Inclusive lower bound on the per-key selector count.
pub const MIN_SELECTORS: usize = 16;

/// Inclusive upper bound on the per-key selector count.
pub const MAX_SELECTORS: usize = 31;

/// Reduction polynomial for GF(2^8): x^8 + x^4 + x^3 + x + 1.
pub const GF_POLYNOMIAL: u8 = 0x1B;
