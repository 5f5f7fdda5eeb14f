//======================================================================
// src/round.rs
// The per-round selector pipeline over the 7-register state.
//======================================================================

use crate::consts::{ACCUMULATOR_SIZE, REGISTER_COUNT, REGISTER_SIZE};
use crate::gf256;
use crate::key::KeyMaterial;
use crate::ordering::SelectorSchedule;

/// Mutable per-block working state: 7 registers of 512 bits plus the
/// accumulator (leading 8 bytes live, rest zero).
pub(crate) struct CipherState {
    pub(crate) registers: [[u8; REGISTER_SIZE]; REGISTER_COUNT],
    pub(crate) accumulator: [u8; ACCUMULATOR_SIZE],
}

/// Reads the leading eight register bytes as a little-endian word.
#[inline]
fn leading_u64(bytes: &[u8; REGISTER_SIZE]) -> u64 {
    u64::from_le_bytes(bytes[..8].try_into().unwrap())
}

/// XORs `other` into `reg`.
#[inline]
pub(crate) fn xor_register(reg: &mut [u8; REGISTER_SIZE], other: &[u8; REGISTER_SIZE]) {
    for (a, b) in reg.iter_mut().zip(other.iter()) {
        *a ^= *b;
    }
}

/// Runs one round: the full selector sequence, then inter-round mixing.
pub(crate) fn execute_round(
    state: &mut CipherState,
    round_index: usize,
    schedule: &SelectorSchedule,
    km: &KeyMaterial,
) {
    let sbox = &km.sboxes[round_index];
    let round_key_word = leading_u64(&km.round_keys[round_index]);

    for slot in 0..schedule.len {
        let sel = schedule.selectors[slot];

        // Destination register: low 32 bits of (R0 ^ selector ^ round key),
        // reduced mod 7. R0 is re-read every step; earlier selectors steer
        // later ones.
        let dest = (leading_u64(&state.registers[0]) ^ u64::from(sel) ^ round_key_word)
            & 0xFFFF_FFFF;
        let place = (dest % REGISTER_COUNT as u64) as usize;

        let temp = sel.wrapping_mul(2);
        let state_byte = state.registers[place][0];

        let mut gf_result = gf256::gf_mul(temp as u8, state_byte);
        gf_result ^= km.key_constants[schedule.indices[slot]];
        let result = sbox[gf_result as usize];

        let reg = &mut state.registers[place];
        gf256::gf_mul_register(reg, result);

        // Shifted injection into the head byte; shifts of 8..16 inject
        // nothing.
        let shift = sel % 16;
        if shift < 8 {
            reg[0] ^= result << shift;
        }

        let last = reg[REGISTER_SIZE - 1];
        reg[REGISTER_SIZE - 1] = last ^ sbox[usize::from(last)];

        // One-bit rotate of the register as a 512-bit little-endian ring.
        let first = reg[0];
        for i in 0..REGISTER_SIZE - 1 {
            reg[i] = (reg[i] >> 1) | (reg[i + 1] << 7);
        }
        reg[REGISTER_SIZE - 1] = (reg[REGISTER_SIZE - 1] >> 1) | (first << 7);

        let neighbor = state.registers[(place + 1) % REGISTER_COUNT];
        xor_register(&mut state.registers[place], &neighbor);

        // Running sum of result bytes in the accumulator head.
        let acc = u64::from_le_bytes(state.accumulator[..8].try_into().unwrap());
        state.accumulator[..8].copy_from_slice(&acc.wrapping_add(u64::from(result)).to_le_bytes());
    }

    // Inter-round mixing; each register sees the mutations of the ones
    // mixed before it in this same pass.
    for i in 0..REGISTER_COUNT {
        let neighbor = state.registers[(i + 1) % REGISTER_COUNT];
        xor_register(&mut state.registers[i], &neighbor);
        let neighbor = state.registers[(i + 2) % REGISTER_COUNT];
        xor_register(&mut state.registers[i], &neighbor);
    }
}
