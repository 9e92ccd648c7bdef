//! Set-Associative Cache Model.
//!
//! This module implements the replacement engine of the simulator. Each access
//! against a `(set, tag)` pair resolves to one of three outcomes:
//!
//! 1. **Hit:** a valid line in the set already holds the tag.
//! 2. **Miss-Insert:** no line matches, and the first invalid line in the set
//!    receives the tag.
//! 3. **Miss-Evict:** no line matches and the set is full; the replacement policy
//!    picks a victim whose tag is overwritten.
//!
//! After every outcome the policy's `update` runs against the target way. No data
//! is stored; only presence and recency are modelled.

/// Cache replacement policy implementations.
pub mod policies;

/// Packed line storage.
pub mod store;

use std::fmt;

use serde::Serialize;

use self::policies::{AgingPolicy, ReplacementPolicy};
use self::store::{CacheLine, CacheStore};
use crate::common::{AddressLayout, SimError};
use crate::config::CacheConfig;

/// Result of resolving one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessOutcome {
    /// The tag was present.
    Hit,
    /// The tag was absent and an empty line was filled.
    MissInsert,
    /// The tag was absent and a valid line was replaced.
    MissEvict,
}

impl AccessOutcome {
    /// Whether the access hit.
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Whether the access replaced a valid line.
    #[inline]
    pub const fn is_eviction(self) -> bool {
        matches!(self, Self::MissEvict)
    }
}

impl fmt::Display for AccessOutcome {
    /// Formats the outcome the way verbose trace output spells it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::MissInsert => "miss",
            Self::MissEvict => "miss eviction",
        })
    }
}

/// Set-associative cache simulator driven by a replacement policy.
///
/// Owns its line store exclusively; all mutation goes through [`access`](Self::access).
#[derive(Clone, Debug)]
pub struct CacheSim<P = AgingPolicy> {
    store: CacheStore,
    layout: AddressLayout,
    policy: P,
}

impl CacheSim<AgingPolicy> {
    /// Creates a cache with the aging-counter policy.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::Config`] and [`SimError::Allocation`] from
    /// [`CacheStore::allocate`].
    pub fn new(config: &CacheConfig) -> Result<Self, SimError> {
        Self::with_policy(config, AgingPolicy::new())
    }
}

impl<P: ReplacementPolicy> CacheSim<P> {
    /// Creates a cache using `policy` for victim selection.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError::Config`] and [`SimError::Allocation`] from
    /// [`CacheStore::allocate`].
    pub fn with_policy(config: &CacheConfig, policy: P) -> Result<Self, SimError> {
        Ok(Self {
            store: CacheStore::allocate(config)?,
            layout: config.layout(),
            policy,
        })
    }

    /// Read-only view of the line store.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Decodes the line at (`set`, `way`).
    pub fn line(&self, set: usize, way: usize) -> CacheLine {
        self.store.read_line(set, way)
    }

    /// Checks whether `addr`'s block is resident, without touching recency.
    pub fn contains(&self, addr: u64) -> bool {
        let decoded = self.layout.decode(addr);
        self.find(decoded.set_index, decoded.tag).is_some()
    }

    /// Returns the way holding `tag` in `set`, if any.
    fn find(&self, set: usize, tag: u64) -> Option<usize> {
        (0..self.store.ways()).find(|&way| {
            let line = self.store.read_line(set, way);
            line.valid && line.tag == tag
        })
    }

    /// Accesses the block containing `addr`.
    pub fn access(&mut self, addr: u64) -> AccessOutcome {
        let decoded = self.layout.decode(addr);
        self.access_set(decoded.set_index, decoded.tag)
    }

    /// Resolves one access to `tag` within `set`.
    ///
    /// A single pass over the set looks for a matching valid line and remembers
    /// the first invalid line. A hit wins over a free line; a free line wins over
    /// eviction.
    ///
    /// # Panics
    ///
    /// Panics if `set` is not below the configured number of sets.
    pub fn access_set(&mut self, set: usize, tag: u64) -> AccessOutcome {
        let mut free = None;
        let mut hit = None;
        for way in 0..self.store.ways() {
            let line = self.store.read_line(set, way);
            if line.valid {
                if line.tag == tag {
                    hit = Some(way);
                    break;
                }
            } else if free.is_none() {
                free = Some(way);
            }
        }

        let (way, outcome) = match (hit, free) {
            (Some(way), _) => (way, AccessOutcome::Hit),
            (None, Some(way)) => {
                self.store.write_tag(set, way, tag);
                self.store.set_valid(set, way, true);
                (way, AccessOutcome::MissInsert)
            }
            (None, None) => {
                let way = self.policy.get_victim(&self.store, set);
                self.store.write_tag(set, way, tag);
                (way, AccessOutcome::MissEvict)
            }
        };

        self.policy.update(&mut self.store, set, way);
        tracing::trace!(set, way, tag, ?outcome, "cache access");
        outcome
    }

    /// Invalidates every line.
    pub fn flush(&mut self) {
        self.store.clear();
    }
}
