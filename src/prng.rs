//======================================================================
// src/prng.rs
// ChaCha20-backed deterministic generator for schedule derivation.
//======================================================================

use zeroize::{Zeroize, ZeroizeOnDrop};

/// ChaCha20 constant words ("expand 32-byte k", little-endian).
const CHACHA_CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

/// One ChaCha20 quarter round.
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// The ChaCha20 block function: 32-byte key, 12-byte nonce, 32-bit block
/// counter, 20 rounds.
fn chacha_block(key: &[u8; 32], nonce: &[u8; 12], counter: u32) -> [u8; 64] {
    let mut state = [0u32; 16];
    state[..4].copy_from_slice(&CHACHA_CONSTANTS);
    for (i, chunk) in key.chunks_exact(4).enumerate() {
        state[4 + i] = u32::from_le_bytes(chunk.try_into().unwrap());
    }
    state[12] = counter;
    for (i, chunk) in nonce.chunks_exact(4).enumerate() {
        state[13 + i] = u32::from_le_bytes(chunk.try_into().unwrap());
    }

    let mut working = state;
    for _ in 0..10 {
        // Column rounds
        quarter_round(&mut working, 0, 4, 8, 12);
        quarter_round(&mut working, 1, 5, 9, 13);
        quarter_round(&mut working, 2, 6, 10, 14);
        quarter_round(&mut working, 3, 7, 11, 15);

        // Diagonal rounds
        quarter_round(&mut working, 0, 5, 10, 15);
        quarter_round(&mut working, 1, 6, 11, 12);
        quarter_round(&mut working, 2, 7, 8, 13);
        quarter_round(&mut working, 3, 4, 9, 14);
    }

    let mut out = [0u8; 64];
    for (i, chunk) in out.chunks_exact_mut(4).enumerate() {
        chunk.copy_from_slice(&working[i].wrapping_add(state[i]).to_le_bytes());
    }
    out
}

/// Deterministic byte generator over the ChaCha20 keystream. Used for the
/// selector permutation at key-expansion time and the per-block priority
/// draw; never for encryption itself.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct ChaChaPrng {
    key: [u8; 32],
    nonce: [u8; 12],
    counter: u32,
    buffer: [u8; 64],
    pos: usize,
}

impl ChaChaPrng {
    /// Creates a generator with an all-zero nonce.
    pub(crate) fn new(seed: [u8; 32]) -> Self {
        Self::with_nonce(seed, [0u8; 12])
    }

    pub(crate) fn with_nonce(seed: [u8; 32], nonce: [u8; 12]) -> Self {
        Self {
            key: seed,
            nonce,
            counter: 0,
            buffer: [0u8; 64],
            pos: 64,
        }
    }

    fn refill(&mut self) {
        self.buffer = chacha_block(&self.key, &self.nonce, self.counter);
        self.counter = self.counter.wrapping_add(1);
        self.pos = 0;
    }

    /// Emits the next `out.len()` keystream bytes.
    pub(crate) fn next_bytes(&mut self, out: &mut [u8]) {
        let mut written = 0;
        while written < out.len() {
            if self.pos >= 64 {
                self.refill();
            }
            let take = (out.len() - written).min(64 - self.pos);
            out[written..written + take].copy_from_slice(&self.buffer[self.pos..self.pos + take]);
            self.pos += take;
            written += take;
        }
    }

    /// Packs the next four stream bytes big-endian.
    pub(crate) fn next_u32(&mut self) -> u32 {
        let mut bytes = [0u8; 4];
        self.next_bytes(&mut bytes);
        u32::from_be_bytes(bytes)
    }

    /// Uniform draw from `[0, max)` by rejection sampling.
    pub(crate) fn next_int(&mut self, max: u32) -> u32 {
        let bound = (u32::MAX / max) * max;
        loop {
            let value = self.next_u32();
            if value < bound {
                return value % max;
            }
        }
    }
}
