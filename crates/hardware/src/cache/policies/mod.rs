//! Cache Replacement Policies.
//!
//! Implements victim selection and per-access bookkeeping for a set-associative
//! cache. Policies keep their state inside the packed [`CacheStore`] lines
//! (the recency byte), so they are stateless objects operating on the store.
//!
//! # Policies
//!
//! - `Aging`: Saturating per-line counters aged by neighbour accesses.

/// Aging-counter replacement policy.
pub mod aging;

pub use aging::AgingPolicy;

use super::store::CacheStore;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating usage state and selecting victim lines.
pub trait ReplacementPolicy {
    /// Updates the policy state after a line has been accessed.
    ///
    /// Called once per access (hit, insert, or eviction) after the target way is
    /// known and after the target line has been marked valid.
    ///
    /// # Arguments
    ///
    /// * `store` - The line storage holding per-line state.
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was accessed.
    fn update(&self, store: &mut CacheStore, set: usize, way: usize);

    /// Selects a victim line to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `store` - The line storage holding per-line state.
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn get_victim(&self, store: &CacheStore, set: usize) -> usize;
}
