//======================================================================
// src/block.rs
// Per-block orchestration: state init, rounds, keystream, feedback.
//======================================================================

use cfg_if::cfg_if;

use crate::consts::{ACCUMULATOR_SIZE, BLOCK_SIZE, IV_SIZE, KEY_SIZE, REGISTER_SIZE, ROUNDS};
use crate::key::KeyMaterial;
use crate::ordering;
use crate::round::{self, CipherState};
use crate::xof;

/// Hashes the IV into one register's worth of whitening material. The
/// expansion does not depend on the block number, so batch and stream
/// callers compute it once.
pub(crate) fn expand_iv(iv: &[u8; IV_SIZE]) -> [u8; REGISTER_SIZE] {
    let mut expanded = [0u8; REGISTER_SIZE];
    xof::shake256(&[iv, b"RUC-IV-EXPAND"], &mut expanded);
    expanded
}

/// Builds the per-block state: key registers, IV whitening into every
/// register, block counter mixed into register 0 only.
fn init_state(
    km: &KeyMaterial,
    iv_expanded: &[u8; REGISTER_SIZE],
    block_number: u32,
) -> CipherState {
    let mut state = CipherState {
        registers: km.registers,
        accumulator: [0u8; ACCUMULATOR_SIZE],
    };
    for register in state.registers.iter_mut() {
        round::xor_register(register, iv_expanded);
    }

    let mut counter_hash = [0u8; REGISTER_SIZE];
    xof::shake256(
        &[&u64::from(block_number).to_le_bytes(), b"CTR"],
        &mut counter_hash,
    );
    round::xor_register(&mut state.registers[0], &counter_hash);

    state
}

/// Drives a fresh state through all 24 rounds for `block_number`.
fn block_state(
    km: &KeyMaterial,
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    iv_expanded: &[u8; REGISTER_SIZE],
    block_number: u32,
) -> CipherState {
    let mut state = init_state(km, iv_expanded, block_number);
    let schedule = ordering::order_selectors(km, key, iv, u64::from(block_number));
    for r in 0..ROUNDS {
        round::execute_round(&mut state, r, &schedule, km);
    }
    state
}

/// Squeezes the 32-byte keystream out of the post-round state.
fn derive_keystream(state: &CipherState, block_number: u32) -> [u8; BLOCK_SIZE] {
    let mut keystream = [0u8; BLOCK_SIZE];
    xof::shake256(
        &[
            &state.accumulator,
            &state.registers[0],
            &state.registers[1],
            &state.registers[2],
            &state.registers[3],
            &state.registers[4],
            &state.registers[5],
            &state.registers[6],
            b"RUC-KS",
            &u64::from(block_number).to_le_bytes(),
        ],
        &mut keystream,
    );
    keystream
}

/// XORs the ciphertext into every register. The state is dropped right
/// after, so feedback never crosses a block boundary.
fn apply_ciphertext_feedback(state: &mut CipherState, ciphertext: &[u8; BLOCK_SIZE]) {
    for register in state.registers.iter_mut() {
        for (j, byte) in register.iter_mut().enumerate() {
            *byte ^= ciphertext[j % BLOCK_SIZE];
        }
    }
}

/// Computes the keystream block alone, for the stream adapter.
pub(crate) fn keystream_block(
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    iv_expanded: &[u8; REGISTER_SIZE],
    block_number: u32,
    km: &KeyMaterial,
) -> [u8; BLOCK_SIZE] {
    let state = block_state(km, key, iv, iv_expanded, block_number);
    derive_keystream(&state, block_number)
}

fn process_block(
    input: &[u8; BLOCK_SIZE],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    iv_expanded: &[u8; REGISTER_SIZE],
    block_number: u32,
    km: &KeyMaterial,
) -> [u8; BLOCK_SIZE] {
    let mut state = block_state(km, key, iv, iv_expanded, block_number);
    let keystream = derive_keystream(&state, block_number);

    let mut output = [0u8; BLOCK_SIZE];
    for (i, byte) in output.iter_mut().enumerate() {
        *byte = input[i] ^ keystream[i];
    }

    apply_ciphertext_feedback(&mut state, &output);
    output
}

/// Encrypts one 32-byte block; `block_number` binds the block to its
/// position in the stream.
pub fn encrypt_block(
    plaintext: &[u8; BLOCK_SIZE],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    block_number: u32,
    km: &KeyMaterial,
) -> [u8; BLOCK_SIZE] {
    let iv_expanded = expand_iv(iv);
    process_block(plaintext, key, iv, &iv_expanded, block_number, km)
}

/// Decrypts one 32-byte block. Identical to [`encrypt_block`]: both
/// directions XOR the same keystream.
pub fn decrypt_block(
    ciphertext: &[u8; BLOCK_SIZE],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    block_number: u32,
    km: &KeyMaterial,
) -> [u8; BLOCK_SIZE] {
    encrypt_block(ciphertext, key, iv, block_number, km)
}

/// Encrypts `plaintext.len() / 32` contiguous blocks into `ciphertext`;
/// block `i` uses block number `start_block_number + i`. Equivalent to the
/// same sequence of [`encrypt_block`] calls.
///
/// Panics if `plaintext` is not a whole number of blocks or the output
/// length differs.
pub fn encrypt_blocks_batch(
    plaintext: &[u8],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    start_block_number: u32,
    km: &KeyMaterial,
    ciphertext: &mut [u8],
) {
    assert_eq!(
        plaintext.len() % BLOCK_SIZE,
        0,
        "input must be a whole number of {BLOCK_SIZE}-byte blocks"
    );
    assert_eq!(
        plaintext.len(),
        ciphertext.len(),
        "output buffer must match the input length"
    );

    let iv_expanded = expand_iv(iv);

    cfg_if! {
        if #[cfg(feature = "parallel")] {
            use rayon::prelude::*;

            ciphertext
                .par_chunks_exact_mut(BLOCK_SIZE)
                .zip(plaintext.par_chunks_exact(BLOCK_SIZE))
                .enumerate()
                .for_each(|(i, (out_block, in_block))| {
                    let block_number = start_block_number.wrapping_add(i as u32);
                    let in_block: &[u8; BLOCK_SIZE] = in_block.try_into().unwrap();
                    out_block.copy_from_slice(&process_block(
                        in_block,
                        key,
                        iv,
                        &iv_expanded,
                        block_number,
                        km,
                    ));
                });
        } else {
            for (i, (out_block, in_block)) in ciphertext
                .chunks_exact_mut(BLOCK_SIZE)
                .zip(plaintext.chunks_exact(BLOCK_SIZE))
                .enumerate()
            {
                let block_number = start_block_number.wrapping_add(i as u32);
                let in_block: &[u8; BLOCK_SIZE] = in_block.try_into().unwrap();
                out_block.copy_from_slice(&process_block(
                    in_block,
                    key,
                    iv,
                    &iv_expanded,
                    block_number,
                    km,
                ));
            }
        }
    }
}

/// Decrypts a contiguous run of blocks. Identical to
/// [`encrypt_blocks_batch`] with ciphertext in and plaintext out.
pub fn decrypt_blocks_batch(
    ciphertext: &[u8],
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    start_block_number: u32,
    km: &KeyMaterial,
    plaintext: &mut [u8],
) {
    encrypt_blocks_batch(ciphertext, key, iv, start_block_number, km, plaintext);
}
