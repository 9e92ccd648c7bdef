//! Trace replay.
//!
//! Provides the trace record parser and the simulator that folds a trace over
//! the cache model.

/// Trace record model and tokenizer.
pub mod trace;

/// Trace driver owning the cache and running totals.
pub mod simulator;

pub use simulator::{RecordOutcome, Simulator};
pub use trace::{AccessKind, MemoryAccess, parse_line};
