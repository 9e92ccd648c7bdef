//! Common types shared across the cache simulator.
//!
//! This module provides the building blocks used by every other component:
//! 1. **Address Decomposition:** Splitting a 64-bit address into tag, set index, and block offset.
//! 2. **Error Handling:** Fatal simulator errors and recoverable trace parse errors.

/// Address decomposition (tag / set index / block offset).
pub mod addr;

/// Error types for configuration, allocation, and trace processing.
pub mod error;

pub use addr::{AddressLayout, DecodedAddr};
pub use error::{SimError, TraceParseError};
