//! Simulator: owns the cache model and the running totals.
//!
//! The driver is a deterministic fold over the trace. Each data record is split
//! into tag and set index, resolved against the cache once (load, store) or twice
//! (modify = load then store), and the outcomes are accumulated into `SimStats`.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::cache::policies::{AgingPolicy, ReplacementPolicy};
use crate::cache::{AccessOutcome, CacheSim};
use crate::common::SimError;
use crate::config::CacheConfig;
use crate::sim::trace::{self, AccessKind, MemoryAccess};
use crate::stats::SimStats;

/// Outcome(s) of one trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A load or store: one cache access.
    Single(AccessOutcome),
    /// A modify: the load access followed by the store access.
    Modify {
        /// Outcome of the load phase.
        load: AccessOutcome,
        /// Outcome of the store phase. Always a hit.
        store: AccessOutcome,
    },
}

impl RecordOutcome {
    /// Iterates over the individual access outcomes in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = AccessOutcome> + use<> {
        let (first, second) = match *self {
            Self::Single(outcome) => (outcome, None),
            Self::Modify { load, store } => (load, Some(store)),
        };
        std::iter::once(first).chain(second)
    }
}

impl fmt::Display for RecordOutcome {
    /// Formats the outcomes space-separated, e.g. `miss eviction hit`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(outcome) => write!(f, "{outcome}"),
            Self::Modify { load, store } => write!(f, "{load} {store}"),
        }
    }
}

/// Top-level simulator: configuration, cache model, and totals.
#[derive(Clone, Debug)]
pub struct Simulator<P = AgingPolicy> {
    config: CacheConfig,
    cache: CacheSim<P>,
    stats: SimStats,
}

impl Simulator<AgingPolicy> {
    /// Creates a simulator with an empty cache of the given geometry.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] for an invalid geometry and
    /// [`SimError::Allocation`] if the cache store cannot be allocated.
    pub fn new(config: CacheConfig) -> Result<Self, SimError> {
        Self::with_policy(config, AgingPolicy::new())
    }
}

impl<P: ReplacementPolicy> Simulator<P> {
    /// Creates a simulator using a specific replacement policy.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::new`].
    pub fn with_policy(config: CacheConfig, policy: P) -> Result<Self, SimError> {
        Ok(Self {
            cache: CacheSim::with_policy(&config, policy)?,
            config,
            stats: SimStats::default(),
        })
    }

    /// Geometry this simulator was built with.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// The cache model.
    pub const fn cache(&self) -> &CacheSim<P> {
        &self.cache
    }

    /// Totals accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Resolves one cache access and accumulates its outcome.
    fn resolve(&mut self, address: u64) -> AccessOutcome {
        let outcome = self.cache.access(address);
        self.stats.record(outcome);
        outcome
    }

    /// Applies one data record to the cache.
    pub fn step(&mut self, access: &MemoryAccess) -> RecordOutcome {
        match access.kind {
            AccessKind::Load | AccessKind::Store => {
                RecordOutcome::Single(self.resolve(access.address))
            }
            AccessKind::Modify => {
                let load = self.resolve(access.address);
                let store = self.resolve(access.address);
                RecordOutcome::Modify { load, store }
            }
        }
    }

    /// Replays a whole trace, returning the final totals.
    ///
    /// Malformed records are skipped with a warning and counted in
    /// [`SimStats::skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceRead`] if the reader fails.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<&SimStats, SimError> {
        self.drive(reader, None)?;
        Ok(&self.stats)
    }

    /// Replays a whole trace, writing one `<record> <outcome>...` line per data
    /// record to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceRead`] if the reader fails and
    /// [`SimError::Output`] if `out` cannot be written.
    pub fn run_verbose<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
    ) -> Result<&SimStats, SimError> {
        self.drive(reader, Some(out))?;
        Ok(&self.stats)
    }

    /// Opens `path` and replays it; see [`run_verbose`](Self::run_verbose).
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TraceOpen`] if the file cannot be opened, otherwise
    /// the errors of [`run_verbose`](Self::run_verbose).
    pub fn run_file(
        &mut self,
        path: &Path,
        verbose: Option<&mut dyn Write>,
    ) -> Result<&SimStats, SimError> {
        let file = File::open(path).map_err(|source| SimError::TraceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "replaying trace");
        self.drive(BufReader::new(file), verbose)?;
        Ok(&self.stats)
    }

    fn drive<R: BufRead>(
        &mut self,
        reader: R,
        mut verbose: Option<&mut dyn Write>,
    ) -> Result<(), SimError> {
        for (index, raw) in reader.split(b'\n').enumerate() {
            let mut raw = raw.map_err(SimError::TraceRead)?;
            if raw.last() == Some(&b'\r') {
                let _ = raw.pop();
            }
            let line = String::from_utf8_lossy(&raw);

            let access = match trace::parse_line(&line) {
                Ok(Some(access)) => access,
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!(line = index + 1, record = %line, "skipping malformed record: {e}");
                    self.stats.skipped += 1;
                    continue;
                }
            };

            let outcome = self.step(&access);
            if let Some(out) = verbose.as_deref_mut() {
                writeln!(out, "{line} {outcome}").map_err(SimError::Output)?;
            }
        }

        tracing::info!(
            hits = self.stats.hits,
            misses = self.stats.misses,
            evictions = self.stats.evictions,
            skipped = self.stats.skipped,
            "trace replay finished"
        );
        Ok(())
    }
}
