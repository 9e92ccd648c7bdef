//! Trace record parsing.
//!
//! A trace holds one memory reference per line:
//!
//! ```text
//! I 0400d7d4,8
//!  L 7ff0005c8,8
//!  S 7ff0005d0,4
//!  M 0421c7f0,4
//! ```
//!
//! `I` (instruction fetch) lines and blank lines carry nothing for a data cache
//! and are ignored. Every other line must be an operation letter, whitespace, a
//! hexadecimal address of at most 16 digits, a comma, and a decimal size.
//! Anything else is rejected with a [`TraceParseError`] so the caller can skip it.

use std::fmt;

use crate::common::TraceParseError;

/// Longest raw record accepted, in bytes.
pub const MAX_RECORD_LEN: usize = 256;

/// Maximum number of hex digits in an address.
const MAX_ADDRESS_DIGITS: usize = 16;

/// Kind of data reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Data load (`L`): one cache access.
    Load,
    /// Data store (`S`): one cache access.
    Store,
    /// Data modify (`M`): a load followed by a store to the same address.
    Modify,
}

impl AccessKind {
    /// Maps a trace operation letter to its kind.
    pub const fn from_op(op: char) -> Option<Self> {
        match op {
            'L' => Some(Self::Load),
            'S' => Some(Self::Store),
            'M' => Some(Self::Modify),
            _ => None,
        }
    }

    /// Trace operation letter for this kind.
    pub const fn op(self) -> char {
        match self {
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }
}

/// One parsed data reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryAccess {
    /// Load, store, or modify.
    pub kind: AccessKind,
    /// Referenced address.
    pub address: u64,
    /// Access width in bytes. Parsed but not used by the cache model.
    pub size: u32,
}

impl fmt::Display for MemoryAccess {
    /// Formats the access in trace syntax, including the leading space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " {} {:x},{}", self.kind.op(), self.address, self.size)
    }
}

/// Parses one trace line (without its line terminator).
///
/// # Returns
///
/// * `Ok(Some(access))` for a load, store, or modify record.
/// * `Ok(None)` for instruction fetches and blank lines.
///
/// # Errors
///
/// Returns a [`TraceParseError`] describing why the record is malformed. No
/// input can cause a read past the end of `line`.
pub fn parse_line(line: &str) -> Result<Option<MemoryAccess>, TraceParseError> {
    if line.len() > MAX_RECORD_LEN {
        return Err(TraceParseError::LineTooLong(line.len()));
    }

    let body = line.trim();
    let mut chars = body.chars();
    let Some(op) = chars.next() else {
        return Ok(None);
    };
    if op == 'I' {
        return Ok(None);
    }
    let kind = AccessKind::from_op(op).ok_or(TraceParseError::UnknownOperation(op))?;

    let rest = chars.as_str();
    if !rest.starts_with(char::is_whitespace) {
        return Err(if rest.is_empty() {
            TraceParseError::MissingComma
        } else {
            TraceParseError::MissingSeparator
        });
    }

    let (addr, size) = rest
        .trim_start()
        .split_once(',')
        .ok_or(TraceParseError::MissingComma)?;

    Ok(Some(MemoryAccess {
        kind,
        address: parse_address(addr)?,
        size: parse_size(size)?,
    }))
}

fn parse_address(field: &str) -> Result<u64, TraceParseError> {
    if field.is_empty() {
        return Err(TraceParseError::EmptyAddress);
    }
    if !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TraceParseError::InvalidAddress(field.to_string()));
    }
    if field.len() > MAX_ADDRESS_DIGITS {
        return Err(TraceParseError::AddressTooLong(field.len()));
    }
    u64::from_str_radix(field, 16).map_err(|_| TraceParseError::InvalidAddress(field.to_string()))
}

fn parse_size(field: &str) -> Result<u32, TraceParseError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TraceParseError::InvalidSize(field.to_string()));
    }
    field
        .parse()
        .map_err(|_| TraceParseError::InvalidSize(field.to_string()))
}
