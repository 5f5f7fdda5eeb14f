#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

//======================================================================
// src/lib.rs
// Crate entry point: public API and module wiring.
//======================================================================

// --- Module declarations ---
mod block;
pub mod consts;
mod gf256;
mod key;
mod ordering;
mod prng;
mod round;
mod sbox;
pub mod stream;
pub mod xof;

// --- Public API ---
pub use crate::block::{
    decrypt_block, decrypt_blocks_batch, encrypt_block, encrypt_blocks_batch,
};
pub use crate::key::{expand_key, KeyMaterial};
pub use crate::stream::RucCore;

// --- Convenience Type Aliases for Users ---
pub type RucCipher = cipher::StreamCipherCoreWrapper<RucCore>;


pub use cipher;
pub use digest;
