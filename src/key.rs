//======================================================================
// src/key.rs
// Key expansion: all key-dependent material for a cipher instance.
//======================================================================

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::consts::{
    KEY_SIZE, MAX_SELECTORS, MIN_SELECTORS, REGISTER_COUNT, REGISTER_SIZE, ROUNDS,
};
use crate::prng::ChaChaPrng;
use crate::sbox;
use crate::xof;

/// Expanded key material: the initial registers, the selector schedule,
/// per-round keys and S-boxes, and the per-selector constants. Built once
/// per key, immutable afterwards, and freely shareable across threads.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    pub(crate) registers: [[u8; REGISTER_SIZE]; REGISTER_COUNT],
    /// Selector values; only the first `num_selectors` entries are live.
    pub(crate) selectors: [u16; MAX_SELECTORS],
    pub(crate) num_selectors: usize,
    pub(crate) round_keys: [[u8; REGISTER_SIZE]; ROUNDS],
    pub(crate) sboxes: [[u8; 256]; ROUNDS],
    /// One constant byte per selector position (post-permutation order).
    pub(crate) key_constants: [u8; MAX_SELECTORS],
}

impl KeyMaterial {
    /// Number of selectors active for this key (16..=31).
    pub fn num_selectors(&self) -> usize {
        self.num_selectors
    }
}

/// Expands `key` into a [`KeyMaterial`]. Pure in the key: identical keys
/// always yield identical material.
pub fn expand_key(key: &[u8; KEY_SIZE]) -> KeyMaterial {
    let mut registers = [[0u8; REGISTER_SIZE]; REGISTER_COUNT];
    for (i, register) in registers.iter_mut().enumerate() {
        xof::shake256_domain(key, "RUC-REG", i as u16, register);
    }

    let num_selectors =
        MIN_SELECTORS + usize::from(key[1]) % (MAX_SELECTORS - MIN_SELECTORS + 1);

    // Selectors are big-endian u16s from the XOF, forced odd and nonzero.
    let mut selectors = [0u16; MAX_SELECTORS];
    for (i, selector) in selectors[..num_selectors].iter_mut().enumerate() {
        let mut sel_bytes = [0u8; 2];
        xof::shake256_domain(key, "RUC-SEL", i as u16, &mut sel_bytes);
        let mut sel = u16::from_be_bytes(sel_bytes);
        if sel % 2 == 0 {
            sel += 1;
        }
        if sel == 0 {
            sel = 1;
        }
        *selector = sel;
    }

    // Permute the selectors with a key-seeded generator.
    let mut permute_seed = [0u8; 32];
    xof::shake256(&[key, b"RUC-PERM"], &mut permute_seed);
    let mut prng = ChaChaPrng::new(permute_seed);
    for i in (1..num_selectors).rev() {
        let j = prng.next_int(i as u32 + 1) as usize;
        selectors.swap(i, j);
    }

    let mut round_keys = [[0u8; REGISTER_SIZE]; ROUNDS];
    for (r, round_key) in round_keys.iter_mut().enumerate() {
        xof::shake256_domain(key, "RUC-RK", r as u16, round_key);
    }

    let mut sboxes = [[0u8; 256]; ROUNDS];
    for (r, sbox) in sboxes.iter_mut().enumerate() {
        *sbox = sbox::generate_sbox(key, r as u16);
    }

    // One constant byte per selector position. The round engine resolves
    // constants through the selector's position, not its value.
    let mut key_constants = [0u8; MAX_SELECTORS];
    for (constant, selector) in key_constants[..num_selectors]
        .iter_mut()
        .zip(&selectors[..num_selectors])
    {
        let mut byte = [0u8; 1];
        xof::shake256(&[key, b"RUC-CONST", &selector.to_be_bytes()], &mut byte);
        *constant = byte[0];
    }

    KeyMaterial {
        registers,
        selectors,
        num_selectors,
        round_keys,
        sboxes,
        key_constants,
    }
}
