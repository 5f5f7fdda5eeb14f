//======================================================================
// src/xof.rs
// SHAKE256 extendable-output function over Keccak-f[1600].
//======================================================================

use digest::{ExtendableOutput, Update, XofReader};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SHAKE256 rate in bytes (1088-bit rate, 512-bit capacity).
const RATE: usize = 136;

/// Keccak-f[1600] round constants (iota step).
const RC: [u64; 24] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rotation offsets for the rho step, in pi traversal order.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane traversal order for the combined rho/pi step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// The Keccak-f[1600] permutation (24 rounds).
fn keccak_f1600(state: &mut [u64; 25]) {
    for &rc in RC.iter() {
        // Theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // Rho and Pi
        let mut last = state[1];
        for (&idx, &rot) in PI.iter().zip(RHO.iter()) {
            let tmp = state[idx];
            state[idx] = last.rotate_left(rot);
            last = tmp;
        }

        // Chi
        for y in 0..5 {
            let row = [
                state[5 * y],
                state[5 * y + 1],
                state[5 * y + 2],
                state[5 * y + 3],
                state[5 * y + 4],
            ];
            for x in 0..5 {
                state[5 * y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // Iota
        state[0] ^= rc;
    }
}

//======================================================================
// Shake256 / Shake256Reader - absorb and squeeze halves of the sponge
//======================================================================

/// Incremental SHAKE256 hasher. Absorb with [`Update`], then squeeze
/// arbitrarily many bytes through the [`Shake256Reader`] returned by
/// [`ExtendableOutput::finalize_xof`].
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Shake256 {
    state: [u64; 25],
    pos: usize,
}

impl Shake256 {
    /// Creates an empty hasher.
    pub fn new() -> Self {
        Self {
            state: [0u64; 25],
            pos: 0,
        }
    }

    #[inline]
    fn absorb_byte(&mut self, byte: u8) {
        self.state[self.pos / 8] ^= u64::from(byte) << (8 * (self.pos % 8));
        self.pos += 1;
        if self.pos == RATE {
            keccak_f1600(&mut self.state);
            self.pos = 0;
        }
    }
}

impl Default for Shake256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Update for Shake256 {
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.absorb_byte(byte);
        }
    }
}

impl ExtendableOutput for Shake256 {
    type Reader = Shake256Reader;

    fn finalize_xof(mut self) -> Self::Reader {
        // 0x1F domain separator at the current offset, final bit of the
        // rate block, then one permutation before squeezing starts.
        self.state[self.pos / 8] ^= 0x1Fu64 << (8 * (self.pos % 8));
        self.state[(RATE - 1) / 8] ^= 0x80u64 << (8 * ((RATE - 1) % 8));
        keccak_f1600(&mut self.state);

        Shake256Reader {
            state: self.state,
            pos: 0,
        }
    }
}

/// Squeezing half of the SHAKE256 sponge. Created by finalizing a
/// [`Shake256`] hasher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Shake256Reader {
    state: [u64; 25],
    pos: usize,
}

impl XofReader for Shake256Reader {
    fn read(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            if self.pos == RATE {
                keccak_f1600(&mut self.state);
                self.pos = 0;
            }
            *byte = (self.state[self.pos / 8] >> (8 * (self.pos % 8))) as u8;
            self.pos += 1;
        }
    }
}

//======================================================================
// One-shot helpers for schedule derivation
//======================================================================

/// SHAKE256 over the concatenation of `parts`, filling `out`.
pub(crate) fn shake256(parts: &[&[u8]], out: &mut [u8]) {
    let mut xof = Shake256::new();
    for part in parts {
        xof.update(part);
    }
    xof.finalize_xof().read(out);
}

/// SHAKE256 over `key || tag || index`, the index appended big-endian.
pub(crate) fn shake256_domain(key: &[u8], tag: &str, index: u16, out: &mut [u8]) {
    shake256(&[key, tag.as_bytes(), &index.to_be_bytes()], out);
}
