//======================================================================
// src/stream.rs
// RustCrypto stream-cipher adapter over the block engine.
//======================================================================

use cipher::{
    consts::{U1, U32, U64},
    Block, BlockSizeUser, Iv, IvSizeUser, Key, KeyIvInit, KeySizeUser, ParBlocksSizeUser,
    StreamBackend, StreamCipherCore, StreamCipherSeekCore,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block;
use crate::consts::{IV_SIZE, KEY_SIZE, REGISTER_SIZE};
use crate::key::{expand_key, KeyMaterial};

/// The core engine for the RUC stream adapter: one 32-byte keystream block
/// per cipher block number, seekable on the 32-bit block counter.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RucCore {
    key_material: KeyMaterial,
    key: [u8; KEY_SIZE],
    iv: [u8; IV_SIZE],
    /// Cached IV whitening; the expansion is block-independent.
    iv_expanded: [u8; REGISTER_SIZE],
    /// The block number the next keystream block is generated for.
    counter: u32,
}

impl KeySizeUser for RucCore {
    type KeySize = U64;
}

impl IvSizeUser for RucCore {
    type IvSize = U32;
}

impl BlockSizeUser for RucCore {
    type BlockSize = U32; // 256-bit blocks
}

impl KeyIvInit for RucCore {
    fn new(key: &Key<Self>, iv: &Iv<Self>) -> Self {
        let mut key_bytes = [0u8; KEY_SIZE];
        key_bytes.copy_from_slice(key);
        let mut iv_bytes = [0u8; IV_SIZE];
        iv_bytes.copy_from_slice(iv);

        let key_material = expand_key(&key_bytes);
        let iv_expanded = block::expand_iv(&iv_bytes);

        Self {
            key_material,
            key: key_bytes,
            iv: iv_bytes,
            iv_expanded,
            counter: 0,
        }
    }
}

impl StreamCipherCore for RucCore {
    fn remaining_blocks(&self) -> Option<usize> {
        None
    }

    fn process_with_backend(&mut self, f: impl cipher::StreamClosure<BlockSize = Self::BlockSize>) {
        f.call(&mut Backend(self));
    }
}

impl StreamCipherSeekCore for RucCore {
    type Counter = u32;

    fn get_block_pos(&self) -> Self::Counter {
        self.counter
    }

    fn set_block_pos(&mut self, pos: Self::Counter) {
        self.counter = pos;
    }
}

/// Serial keystream backend.
struct Backend<'a>(&'a mut RucCore);

impl BlockSizeUser for Backend<'_> {
    type BlockSize = U32;
}

impl ParBlocksSizeUser for Backend<'_> {
    type ParBlocksSize = U1;
}

impl StreamBackend for Backend<'_> {
    #[inline]
    fn gen_ks_block(&mut self, block: &mut Block<Self>) {
        let core = &mut *self.0;
        let keystream = block::keystream_block(
            &core.key,
            &core.iv,
            &core.iv_expanded,
            core.counter,
            &core.key_material,
        );
        core.counter = core.counter.wrapping_add(1);
        block.copy_from_slice(&keystream);
    }
}
