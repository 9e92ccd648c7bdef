//! Simulator error definitions.
//!
//! Two families of errors exist:
//! 1. **Fatal errors** (`SimError`): bad geometry, failed cache allocation, or an unreadable
//!    trace. These abort the run before a summary is produced.
//! 2. **Record errors** (`TraceParseError`): a single malformed trace line. The driver skips
//!    the record, logs a warning, and keeps going.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while configuring or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache geometry is missing a field or is out of range.
    #[error("invalid cache configuration: {0}")]
    Config(String),

    /// The packed line buffer could not be obtained.
    #[error("failed to allocate {bytes} bytes for the cache store")]
    Allocation {
        /// Requested buffer size in bytes (saturated at `usize::MAX` on overflow).
        bytes: usize,
    },

    /// The trace file could not be opened.
    #[error("failed to open trace file {}: {source}", .path.display())]
    TraceOpen {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Reading from an already-open trace failed part way through.
    #[error("failed to read trace: {0}")]
    TraceRead(#[source] io::Error),

    /// Writing verbose output failed.
    #[error("failed to write simulator output: {0}")]
    Output(#[source] io::Error),
}

/// Reasons a single trace record is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TraceParseError {
    /// The operation letter is not one of `L`, `S`, `M`.
    #[error("unknown operation '{0}'")]
    UnknownOperation(char),

    /// No whitespace between the operation letter and the address.
    #[error("missing separator after operation")]
    MissingSeparator,

    /// The `<address>,<size>` field has no comma.
    #[error("missing ',' between address and size")]
    MissingComma,

    /// The address field is empty.
    #[error("empty address")]
    EmptyAddress,

    /// The address has more hex digits than fit in 64 bits.
    #[error("address has {0} digits, at most 16 allowed")]
    AddressTooLong(usize),

    /// The address contains a non-hexadecimal character.
    #[error("invalid hexadecimal address '{0}'")]
    InvalidAddress(String),

    /// The size field is not a decimal integer.
    #[error("invalid access size '{0}'")]
    InvalidSize(String),

    /// The raw line exceeds the record length limit.
    #[error("record is {0} bytes long, limit is {limit}", limit = crate::sim::trace::MAX_RECORD_LEN)]
    LineTooLong(usize),
}
