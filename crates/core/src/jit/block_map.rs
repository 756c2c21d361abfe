//! Block Map (translation cache index).
//!
//! Fixed-capacity open-addressed hash table from a block's starting PC to
//! its [`BlockRef`]. Collisions are resolved by linear probing. The table
//! never evicts individual entries: inserting an existing key replaces it,
//! and the only way to reclaim slots is `clear`, performed together with a
//! code buffer reset.
//!
//! Occupancy is capped at three quarters of the slots. Beyond that, probe
//! chains grow long, so `insert` reports [`MapFull`] and the controller flushes.

use crate::common::MapFull;
use crate::common::constants::{BLOCK_HASH_MULTIPLIER, MIN_BLOCK_MAP_ENTRIES};
use crate::jit::block::BlockRef;

#[derive(Clone, Copy, Debug)]
struct Slot {
    pc: u32,
    block: BlockRef,
}

/// Open-addressed map from `pc_start` to block handle.
#[derive(Debug)]
pub struct BlockMap {
    slots: Vec<Option<Slot>>,
    mask: usize,
    hash_shift: u32,
    len: usize,
    limit: usize,
}

impl BlockMap {
    /// Creates an empty map.
    ///
    /// # Arguments
    ///
    /// * `num_entries` - Slot count; rounded up to a power of two of at least
    ///   [`MIN_BLOCK_MAP_ENTRIES`].
    pub fn new(num_entries: usize) -> Self {
        let capacity = num_entries.max(MIN_BLOCK_MAP_ENTRIES).next_power_of_two();
        Self {
            slots: vec![None; capacity],
            mask: capacity - 1,
            hash_shift: u64::BITS - capacity.trailing_zeros(),
            len: 0,
            limit: capacity - capacity / 4,
        }
    }

    /// Fibonacci hash of the instruction index, taking the top bits.
    #[inline(always)]
    fn slot_of(&self, pc: u32) -> usize {
        (u64::from(pc >> 2).wrapping_mul(BLOCK_HASH_MULTIPLIER) >> self.hash_shift) as usize
    }

    /// Looks up the block starting at `pc`.
    ///
    /// # Returns
    ///
    /// The handle registered for `pc`, or `None` if the key was never inserted
    /// since the last clear.
    pub fn lookup(&self, pc: u32) -> Option<BlockRef> {
        let mut idx = self.slot_of(pc);
        // At least one slot is always empty, so the probe terminates.
        loop {
            match self.slots[idx] {
                None => return None,
                Some(slot) if slot.pc == pc => return Some(slot.block),
                Some(_) => idx = (idx + 1) & self.mask,
            }
        }
    }

    /// Associates `pc` with `block`, replacing any existing entry for `pc`.
    ///
    /// # Returns
    ///
    /// `Err(MapFull)` if `pc` is new and the occupancy limit is reached.
    pub fn insert(&mut self, pc: u32, block: BlockRef) -> Result<(), MapFull> {
        let mut idx = self.slot_of(pc);
        loop {
            match &mut self.slots[idx] {
                Some(slot) if slot.pc == pc => {
                    slot.block = block;
                    return Ok(());
                }
                Some(_) => idx = (idx + 1) & self.mask,
                empty @ None => {
                    if self.len >= self.limit {
                        return Err(MapFull);
                    }
                    *empty = Some(Slot { pc, block });
                    self.len += 1;
                    return Ok(());
                }
            }
        }
    }

    /// Removes every association.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.len = 0;
    }

    /// Number of live associations.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no associations.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of associations before `insert` reports `MapFull`.
    pub const fn limit(&self) -> usize {
        self.limit
    }
}
