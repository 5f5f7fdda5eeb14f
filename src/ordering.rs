//======================================================================
// src/ordering.rs
// Per-block selector ordering.
//======================================================================

use crate::consts::{IV_SIZE, KEY_SIZE, MAX_SELECTORS};
use crate::key::KeyMaterial;
use crate::prng::ChaChaPrng;
use crate::xof;

/// The selector sequence for one block: selectors in execution order, each
/// paired with its original position in the key material (the round engine
/// resolves key constants through that position).
pub(crate) struct SelectorSchedule {
    pub(crate) selectors: [u16; MAX_SELECTORS],
    pub(crate) indices: [usize; MAX_SELECTORS],
    pub(crate) len: usize,
}

#[derive(Clone, Copy, Default)]
struct PriorityItem {
    selector: u16,
    priority: u32,
    index: usize,
}

/// Draws a priority for every selector from a block-bound generator and
/// stable-sorts the selectors by (priority, original position).
pub(crate) fn order_selectors(
    km: &KeyMaterial,
    key: &[u8; KEY_SIZE],
    iv: &[u8; IV_SIZE],
    block_number: u64,
) -> SelectorSchedule {
    let mut seed = [0u8; 32];
    xof::shake256(
        &[key, iv, &block_number.to_le_bytes(), b"RUC-PRIO"],
        &mut seed,
    );
    let mut prng = ChaChaPrng::new(seed);

    let len = km.num_selectors;
    let mut items = [PriorityItem::default(); MAX_SELECTORS];
    for (index, item) in items[..len].iter_mut().enumerate() {
        item.selector = km.selectors[index];
        item.priority = prng.next_int(7);
        item.index = index;
    }
    // The index component is unique, so sorting on (priority, index) is
    // the stable order.
    items[..len].sort_unstable_by_key(|item| (item.priority, item.index));

    let mut schedule = SelectorSchedule {
        selectors: [0u16; MAX_SELECTORS],
        indices: [0usize; MAX_SELECTORS],
        len,
    };
    for (slot, item) in items[..len].iter().enumerate() {
        schedule.selectors[slot] = item.selector;
        schedule.indices[slot] = item.index;
    }
    schedule
}
