//! Packed cache line storage.
//!
//! Every line occupies exactly [`LINE_BYTES`] bytes in one contiguous buffer:
//!
//! ```text
//! byte  0..8   tag, little-endian (byte 0 = least significant)
//! byte  8      valid flag (0 = invalid, anything else = valid)
//! byte  9      recency counter
//! ```
//!
//! The line at (set `i`, way `j`) starts at `i * LINE_BYTES * E + LINE_BYTES * j`.
//! Offsets never leave this module; callers address lines by `(set, way)`.

use crate::common::SimError;
use crate::config::CacheConfig;

/// Size of one packed line in bytes.
pub const LINE_BYTES: usize = 10;

const TAG_BYTES: usize = 8;
const VALID_OFFSET: usize = 8;
const RECENCY_OFFSET: usize = 9;

/// Decoded view of one packed line.
///
/// `tag` and `recency` carry no meaning while `valid` is false.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Tag of the block held by the line.
    pub tag: u64,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Aging counter; higher means longer since the line was last targeted.
    pub recency: u8,
}

/// Flat, zero-initialized buffer of `2^S * E` packed lines.
#[derive(Clone, Debug)]
pub struct CacheStore {
    buf: Vec<u8>,
    num_sets: usize,
    ways: usize,
}

impl CacheStore {
    /// Allocates a zeroed store for `config`; every line starts invalid.
    ///
    /// The geometry is validated first so that later `(set, way)` indices can be
    /// trusted without further checks.
    ///
    /// # Errors
    ///
    /// * [`SimError::Config`] if the geometry is invalid.
    /// * [`SimError::Allocation`] if the buffer size overflows or the allocator
    ///   refuses the request.
    pub fn allocate(config: &CacheConfig) -> Result<Self, SimError> {
        config.validate()?;

        let num_sets = config.num_sets();
        let ways = config.lines_per_set;
        let bytes = LINE_BYTES
            .checked_mul(ways)
            .and_then(|set_bytes| set_bytes.checked_mul(num_sets))
            .ok_or(SimError::Allocation { bytes: usize::MAX })?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes)
            .map_err(|_| SimError::Allocation { bytes })?;
        buf.resize(bytes, 0);

        tracing::debug!(num_sets, ways, bytes, "allocated cache store");

        Ok(Self {
            buf,
            num_sets,
            ways,
        })
    }

    /// Number of sets in the store.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Number of lines (ways) per set.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Total buffer size in bytes, always `LINE_BYTES * E * 2^S`.
    #[inline]
    pub fn size_bytes(&self) -> usize {
        self.buf.len()
    }

    /// Raw packed contents, in layout order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    const fn line_offset(&self, set: usize, way: usize) -> usize {
        set * (LINE_BYTES * self.ways) + LINE_BYTES * way
    }

    #[inline]
    fn line_bytes(&self, set: usize, way: usize) -> &[u8] {
        let start = self.line_offset(set, way);
        &self.buf[start..start + LINE_BYTES]
    }

    #[inline]
    fn line_bytes_mut(&mut self, set: usize, way: usize) -> &mut [u8] {
        let start = self.line_offset(set, way);
        &mut self.buf[start..start + LINE_BYTES]
    }

    /// Decodes the line at (`set`, `way`).
    ///
    /// # Panics
    ///
    /// Panics if `set >= num_sets()` or `way >= ways()`.
    pub fn read_line(&self, set: usize, way: usize) -> CacheLine {
        let raw = self.line_bytes(set, way);
        let mut tag = [0u8; TAG_BYTES];
        tag.copy_from_slice(&raw[..TAG_BYTES]);
        CacheLine {
            tag: u64::from_le_bytes(tag),
            valid: raw[VALID_OFFSET] != 0,
            recency: raw[RECENCY_OFFSET],
        }
    }

    /// Returns only the valid flag of a line.
    #[inline]
    pub fn is_valid(&self, set: usize, way: usize) -> bool {
        self.line_bytes(set, way)[VALID_OFFSET] != 0
    }

    /// Returns only the recency counter of a line.
    #[inline]
    pub fn recency(&self, set: usize, way: usize) -> u8 {
        self.line_bytes(set, way)[RECENCY_OFFSET]
    }

    /// Encodes `tag` into the line's tag bytes, leaving valid and recency untouched.
    pub fn write_tag(&mut self, set: usize, way: usize, tag: u64) {
        self.line_bytes_mut(set, way)[..TAG_BYTES].copy_from_slice(&tag.to_le_bytes());
    }

    /// Sets or clears the valid flag.
    pub fn set_valid(&mut self, set: usize, way: usize, valid: bool) {
        self.line_bytes_mut(set, way)[VALID_OFFSET] = u8::from(valid);
    }

    /// Overwrites the recency counter.
    pub fn set_recency(&mut self, set: usize, way: usize, recency: u8) {
        self.line_bytes_mut(set, way)[RECENCY_OFFSET] = recency;
    }

    /// Invalidates every line. Geometry is unchanged.
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }
}
