//! Address decomposition.
//!
//! A memory address is split into three fields according to the cache geometry:
//!
//! ```text
//!  63                    S+B   S+B-1        B   B-1          0
//! +------------------------+----------------+----------------+
//! |          tag           |   set index    |  block offset  |
//! +------------------------+----------------+----------------+
//! ```
//!
//! Shift amounts of 64 are legal here (`S + B == 64` leaves no tag bits), so
//! every shift and mask goes through the checked helpers below instead of the
//! raw operators.

/// Bit positions used to split an address, derived once from a `CacheConfig`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressLayout {
    set_index_bits: u32,
    block_offset_bits: u32,
}

/// An address split into its cache-relevant fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// High-order bits identifying the memory block held by a line.
    pub tag: u64,
    /// Index of the set the address maps to, always `< 2^S`.
    pub set_index: usize,
    /// Byte offset within the block. Not used by the hit/miss model.
    pub offset: u64,
}

/// Returns a mask with the low `bits` bits set, saturating at all ones.
#[inline]
const fn low_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl AddressLayout {
    /// Creates a layout for `set_index_bits` (S) and `block_offset_bits` (B).
    ///
    /// Callers are expected to have validated `S + B <= 64`; see
    /// [`CacheConfig::validate`](crate::config::CacheConfig::validate).
    pub const fn new(set_index_bits: u32, block_offset_bits: u32) -> Self {
        Self {
            set_index_bits,
            block_offset_bits,
        }
    }

    /// Total number of low-order bits consumed by set index and block offset.
    #[inline]
    pub const fn index_bits(&self) -> u32 {
        self.set_index_bits + self.block_offset_bits
    }

    /// Splits `addr` into tag, set index, and block offset.
    ///
    /// * `tag = addr >> (S+B)`
    /// * `set_index = (addr & (2^(S+B) - 1)) >> B`
    /// * `offset = addr & (2^B - 1)`
    #[inline]
    pub fn decode(&self, addr: u64) -> DecodedAddr {
        let index_bits = self.index_bits();
        let tag = addr.checked_shr(index_bits).unwrap_or(0);
        let set_index = (addr & low_mask(index_bits))
            .checked_shr(self.block_offset_bits)
            .unwrap_or(0);
        let offset = addr & low_mask(self.block_offset_bits);

        DecodedAddr {
            tag,
            set_index: set_index as usize,
            offset,
        }
    }
}
