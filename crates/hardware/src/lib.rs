//! Trace-driven set-associative cache simulator library.
//!
//! This crate predicts how a cache of configurable geometry responds to a replay
//! log of memory references. It contains:
//! 1. **Cache:** A packed line store and a replacement engine with an aging-counter policy.
//! 2. **Trace:** A validating parser for `L`/`S`/`M` reference logs.
//! 3. **Simulation:** A driver that replays a trace and accumulates hit/miss/eviction totals.
//!
//! ```
//! use cachesim_core::{CacheConfig, Simulator};
//!
//! let mut sim = Simulator::new(CacheConfig::new(2, 1, 2)).unwrap();
//! let stats = sim.run(" L 0,1\n L 10,1\n L 0,1\n".as_bytes()).unwrap();
//! assert_eq!(stats.to_string(), "hits:0 misses:3 evictions:2");
//! ```

/// Set-associative cache model (store, policies, replacement engine).
pub mod cache;
/// Common types (address decomposition, errors).
pub mod common;
/// Cache geometry configuration.
pub mod config;
/// Trace parsing and replay.
pub mod sim;
/// Hit/miss/eviction totals.
pub mod stats;

/// Cache geometry; use `CacheConfig::new(s, e, b)` or deserialize from JSON.
pub use crate::config::CacheConfig;
/// Fatal simulator error.
pub use crate::common::SimError;
/// Trace driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Running totals.
pub use crate::stats::SimStats;
