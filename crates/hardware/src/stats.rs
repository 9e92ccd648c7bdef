//! Simulation statistics collection and reporting.
//!
//! This module tracks the running totals of a trace replay. It provides:
//! 1. **Totals:** Hits, misses, and evictions, in the order accesses resolve.
//! 2. **Hygiene:** The number of malformed records that were skipped.
//! 3. **Derived metrics:** Access count, hit rate, and miss rate.

use std::fmt;

use serde::Serialize;

use crate::cache::AccessOutcome;

/// Running totals for one simulation.
///
/// Counters only ever increase; a fresh `SimStats` is created per run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that did not (both inserts and evictions).
    pub misses: u64,
    /// Misses that replaced a valid line.
    pub evictions: u64,
    /// Malformed trace records that were skipped.
    pub skipped: u64,
}

impl SimStats {
    /// Accumulates one resolved access.
    pub const fn record(&mut self, outcome: AccessOutcome) {
        match outcome {
            AccessOutcome::Hit => self.hits += 1,
            AccessOutcome::MissInsert => self.misses += 1,
            AccessOutcome::MissEvict => {
                self.misses += 1;
                self.evictions += 1;
            }
        }
    }

    /// Total cache accesses resolved (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that hit, or `0.0` when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    /// Fraction of accesses that missed, or `0.0` when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        match self.accesses() {
            0 => 0.0,
            total => self.misses as f64 / total as f64,
        }
    }

    /// Prints a detailed breakdown to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("  cache.accesses         {}", self.accesses());
        println!(
            "  cache.hits             {} ({:.2}%)",
            self.hits,
            self.hit_rate() * 100.0
        );
        println!(
            "  cache.misses           {} ({:.2}%)",
            self.misses,
            self.miss_rate() * 100.0
        );
        println!("  cache.evictions        {}", self.evictions);
        println!("  trace.skipped          {}", self.skipped);
        println!("----------------------------------------------------------");
    }
}

impl fmt::Display for SimStats {
    /// Formats the one-line summary `hits:<H> misses:<M> evictions:<E>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{}",
            self.hits, self.misses, self.evictions
        )
    }
}
