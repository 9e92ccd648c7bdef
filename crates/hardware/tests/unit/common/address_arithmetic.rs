//! Address decomposition tests.
//!
//! `tag = addr >> (S+B)`, `set = (addr & (2^(S+B) - 1)) >> B`, `offset = addr & (2^B - 1)`.

use cachesim_core::common::{AddressLayout, DecodedAddr};
use cachesim_core::config::CacheConfig;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(2, 2, 0x0, 0, 0, 0)]
#[case(2, 2, 0x4, 0, 1, 0)]
#[case(2, 2, 0x10, 1, 0, 0)]
#[case(2, 2, 0x1f, 1, 3, 3)]
#[case(4, 4, 0x7ff0005c8, 0x7ff0005, 0xc, 0x8)]
#[case(0, 0, 0xdead, 0xdead, 0, 0)]
fn decode_splits_fields(
    #[case] s: u32,
    #[case] b: u32,
    #[case] addr: u64,
    #[case] tag: u64,
    #[case] set_index: usize,
    #[case] offset: u64,
) {
    let layout = AddressLayout::new(s, b);
    assert_eq!(
        layout.decode(addr),
        DecodedAddr {
            tag,
            set_index,
            offset
        }
    );
}

#[test]
fn layout_matches_config() {
    let config = CacheConfig::new(5, 2, 6);
    assert_eq!(config.layout(), AddressLayout::new(5, 6));
    assert_eq!(config.layout().index_bits(), 11);
}

#[test]
fn full_width_split_does_not_overflow() {
    let layout = AddressLayout::new(32, 32);
    let d = layout.decode(u64::MAX);
    assert_eq!(d.tag, 0);
    assert_eq!(d.set_index, 0xffff_ffff);
    assert_eq!(d.offset, 0xffff_ffff);
}

proptest! {
    #[test]
    fn fields_reassemble_to_address(addr in any::<u64>(), s in 0u32..24, b in 0u32..24) {
        let d = AddressLayout::new(s, b).decode(addr);
        prop_assert!(d.set_index < (1usize << s));
        prop_assert!(d.offset < (1u64 << b));
        let rebuilt = (d.tag << (s + b)) | ((d.set_index as u64) << b) | d.offset;
        prop_assert_eq!(rebuilt, addr);
    }
}
