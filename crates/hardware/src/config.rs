//! Cache geometry configuration.
//!
//! This module defines the parameters that shape the simulated cache. It provides:
//! 1. **Defaults:** The baseline geometry used when a field is not supplied.
//! 2. **Structure:** `CacheConfig`, holding S (set-index bits), E (lines per set) and
//!    B (block-offset bits).
//! 3. **Validation:** Range checks that every other component relies on instead of
//!    re-checking bounds at each access.
//!
//! Configuration comes from command-line flags or from a JSON document; use
//! `CacheConfig::default()` for the baseline.

use serde::Deserialize;

use crate::common::{AddressLayout, SimError};

/// Default configuration constants for the simulator.
///
/// These mirror the first usage example of the command-line tool
/// (`-s 4 -E 1 -b 4`): a 16-set direct-mapped cache with 16-byte blocks.
mod defaults {
    /// Default number of set-index bits (16 sets).
    pub const SET_INDEX_BITS: u32 = 4;

    /// Default number of lines per set (direct-mapped).
    pub const LINES_PER_SET: usize = 1;

    /// Default number of block-offset bits (16-byte blocks).
    pub const BLOCK_OFFSET_BITS: u32 = 4;
}

/// Width of a simulated address in bits.
pub const ADDRESS_BITS: u32 = u64::BITS;

/// Geometry of a set-associative cache.
///
/// Immutable once validated: the cache store is sized from it exactly once.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::CacheConfig;
///
/// let config = CacheConfig::new(2, 4, 3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.num_sets(), 4);
/// assert_eq!(config.block_bytes(), 8);
/// ```
///
/// Deserializing from JSON, with missing fields taking their defaults:
///
/// ```
/// use cachesim_core::config::CacheConfig;
///
/// let config = CacheConfig::from_json(r#"{ "set_index_bits": 8, "lines_per_set": 2 }"#).unwrap();
/// assert_eq!(config.set_index_bits, 8);
/// assert_eq!(config.lines_per_set, 2);
/// assert_eq!(config.block_offset_bits, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Number of set-index bits (S). The cache has `2^S` sets.
    #[serde(alias = "s")]
    pub set_index_bits: u32,
    /// Number of lines per set (E), i.e. the associativity.
    #[serde(alias = "E")]
    pub lines_per_set: usize,
    /// Number of block-offset bits (B). Each block holds `2^B` bytes.
    #[serde(alias = "b")]
    pub block_offset_bits: u32,
}

impl Default for CacheConfig {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            set_index_bits: defaults::SET_INDEX_BITS,
            lines_per_set: defaults::LINES_PER_SET,
            block_offset_bits: defaults::BLOCK_OFFSET_BITS,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration from raw S, E, B values without validating it.
    pub const fn new(set_index_bits: u32, lines_per_set: usize, block_offset_bits: u32) -> Self {
        Self {
            set_index_bits,
            lines_per_set,
            block_offset_bits,
        }
    }

    /// Parses a configuration from a JSON object and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the JSON is malformed, names an unknown
    /// field, or describes an out-of-range geometry.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the geometry can be simulated.
    ///
    /// Rules:
    /// - `E >= 1`
    /// - `S + B <= 64` (set index and offset fit inside an address)
    /// - `2^S` is representable as a `usize`
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.lines_per_set == 0 {
            return Err(SimError::Config(
                "lines per set (-E) must be at least 1".to_string(),
            ));
        }
        let index_bits = self
            .set_index_bits
            .checked_add(self.block_offset_bits)
            .filter(|&bits| bits <= ADDRESS_BITS)
            .ok_or_else(|| {
                SimError::Config(format!(
                    "set-index bits ({}) plus block-offset bits ({}) exceed the {ADDRESS_BITS}-bit address width",
                    self.set_index_bits, self.block_offset_bits
                ))
            })?;
        if self.set_index_bits >= usize::BITS {
            return Err(SimError::Config(format!(
                "2^{} sets cannot be indexed on this host",
                self.set_index_bits
            )));
        }
        tracing::debug!(
            s = self.set_index_bits,
            e = self.lines_per_set,
            b = self.block_offset_bits,
            index_bits,
            "cache configuration validated"
        );
        Ok(())
    }

    /// Number of sets, `2^S`.
    ///
    /// Only meaningful after [`validate`](Self::validate) succeeded; saturates otherwise.
    #[inline]
    pub fn num_sets(&self) -> usize {
        1usize.checked_shl(self.set_index_bits).unwrap_or(usize::MAX)
    }

    /// Block size in bytes, `2^B`, saturating at `u64::MAX` when `B == 64`.
    #[inline]
    pub fn block_bytes(&self) -> u64 {
        1u64.checked_shl(self.block_offset_bits).unwrap_or(u64::MAX)
    }

    /// Bit layout used to decompose addresses for this geometry.
    #[inline]
    pub const fn layout(&self) -> AddressLayout {
        AddressLayout::new(self.set_index_bits, self.block_offset_bits)
    }
}
