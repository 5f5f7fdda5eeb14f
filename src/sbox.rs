//======================================================================
// src/sbox.rs
// Key- and round-dependent S-box derivation.
//======================================================================

use crate::consts::KEY_SIZE;
use crate::xof;

/// Seed bytes per S-box: two for each Fisher–Yates step.
const SEED_LEN: usize = 512;

/// Derives the S-box for `round`: the identity table shuffled by XOF
/// output, yielding a permutation of the 256 byte values.
pub(crate) fn generate_sbox(key: &[u8; KEY_SIZE], round: u16) -> [u8; 256] {
    let mut sbox = [0u8; 256];
    for (i, entry) in sbox.iter_mut().enumerate() {
        *entry = i as u8;
    }

    let mut seed = [0u8; SEED_LEN];
    xof::shake256(&[key, b"RUC-SBOX", &round.to_be_bytes()], &mut seed);

    // Backwards Fisher–Yates; seed bytes are consumed as big-endian pairs.
    for i in (1..=255usize).rev() {
        let idx = 2 * (255 - i);
        let rand_val = u16::from_be_bytes([seed[idx], seed[idx + 1]]);
        let j = usize::from(rand_val) % (i + 1);
        sbox.swap(i, j);
    }

    sbox
}
