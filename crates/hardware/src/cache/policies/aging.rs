//! Aging-Counter Replacement Policy.
//!
//! Approximates LRU with one 8-bit counter per line. Every access to a set resets
//! the counter of the targeted line to zero and increments the counter of every
//! other valid line in that set, saturating at 255. Invalid lines are held at zero.
//! The victim is the line with the strictly greatest counter; ties go to the
//! lowest way.
//!
//! While no counter has saturated, a line's counter is the number of accesses to
//! its set since it was last targeted, so the victim matches LRU. Once two or more
//! counters reach 255 their relative order is lost and the lowest saturated way is
//! evicted, whichever of them was used least recently.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `update()`: O(W) where W is the number of ways (associativity)
//!   - `get_victim()`: O(W)
//! - **Space Complexity:** one byte per line, stored inside the packed line
//! - **Hardware Cost:** Low - one saturating incrementer per way

use super::ReplacementPolicy;
use crate::cache::store::CacheStore;

/// Aging-counter policy. Holds no state of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgingPolicy;

impl AgingPolicy {
    /// Creates a new aging-counter policy.
    pub const fn new() -> Self {
        Self
    }
}

impl ReplacementPolicy for AgingPolicy {
    /// Resets the accessed line and every invalid line to zero; ages every
    /// other line by one, saturating at `u8::MAX`.
    fn update(&self, store: &mut CacheStore, set: usize, way: usize) {
        for i in 0..store.ways() {
            let next = if i == way || !store.is_valid(set, i) {
                0
            } else {
                store.recency(set, i).saturating_add(1)
            };
            store.set_recency(set, i, next);
        }
    }

    /// Returns the first way holding the maximum counter value.
    ///
    /// A later way must strictly exceed the running maximum to replace it.
    fn get_victim(&self, store: &CacheStore, set: usize) -> usize {
        let mut victim = 0;
        let mut oldest = store.recency(set, 0);
        for i in 1..store.ways() {
            let age = store.recency(set, i);
            if age > oldest {
                victim = i;
                oldest = age;
            }
        }
        victim
    }
}
