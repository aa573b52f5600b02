//! Range table and membership index tests.

use super::*;
use ipnetwork::IpNetwork;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

fn index_of(source: &str) -> RangeIndex {
    RangeIndex::from_table(&RangeTable::parse(source))
}

/// Linear bitmask scan used as the reference answer.
fn naive_contains(ranges: &[IpNetwork], addr: IpAddr) -> bool {
    ranges.iter().any(|range| match (range, addr) {
        (IpNetwork::V4(net), IpAddr::V4(a)) => {
            let mask = u32::from(net.mask());
            u32::from(a) & mask == u32::from(net.ip()) & mask
        }
        (IpNetwork::V6(net), IpAddr::V6(a)) => {
            let mask = u128::from(net.mask());
            u128::from(a) & mask == u128::from(net.ip()) & mask
        }
        _ => false,
    })
}

/// Deterministic xorshift so the comparison test is reproducible.
struct XorShift(u64);

impl XorShift {
    fn next_u32(&mut self) -> u32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 16) as u32
    }
}

#[test]
fn test_parse_skips_blank_and_comment_lines() {
    let table = RangeTable::parse("# header\n\n  10.0.0.0/8  \n\t\n# trailing\n");
    assert_eq!(table.len(), 1);
    assert!(table.skipped().is_empty());
}

#[test]
fn test_parse_isolates_malformed_entry() {
    let source = "10.0.0.0/8\n162.159.128.0/17 \"162.159.13.0/24\n192.168.0.0/16\n";
    let table = RangeTable::parse(source);

    assert_eq!(table.len(), 2);
    assert_eq!(table.skipped().len(), 1);
    assert_eq!(table.skipped()[0].line, 2);
    assert!(table.skipped()[0].entry.starts_with("162.159.128.0/17"));

    let index = RangeIndex::from_table(&table);
    assert!(index.contains(v4(10, 1, 2, 3)));
    assert!(index.contains(v4(192, 168, 44, 1)));
    assert!(!index.contains(v4(162, 159, 130, 1)));
}

#[test]
fn test_parse_rejects_out_of_range_prefix() {
    let table = RangeTable::parse("10.0.0.0/33\n10.0.0.0/not-a-number\n300.1.1.1/8\n");
    assert!(table.is_empty());
    assert_eq!(table.skipped().len(), 3);
    let lines: Vec<usize> = table.skipped().iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_all_bad_table_still_builds_empty_index() {
    let index = index_of("garbage\nmore garbage\n");
    assert!(index.is_empty());
    assert!(!index.contains(v4(1, 1, 1, 1)));
}

#[test]
fn test_base_address_is_member() {
    let table = RangeTable::parse("173.245.48.0/20\n103.21.244.0/22\n1.1.1.0/24\n");
    let index = RangeIndex::from_table(&table);
    for range in table.ranges() {
        assert!(index.contains(range.ip()), "{range} should contain its base");
    }
}

#[test]
fn test_network_and_broadcast_addresses_are_members() {
    let index = index_of("104.16.0.0/12\n");
    assert!(index.contains(v4(104, 16, 0, 0)));
    assert!(index.contains(v4(104, 31, 255, 255)));
    assert!(!index.contains(v4(104, 15, 255, 255)));
    assert!(!index.contains(v4(104, 32, 0, 0)));
}

#[test]
fn test_flipping_bits_inside_and_outside_prefix() {
    let index = index_of("198.41.128.0/17\n");
    let base = u32::from(Ipv4Addr::new(198, 41, 128, 0));

    // Host bits (below the prefix) keep the address inside
    for bit in 0..15 {
        let addr = IpAddr::V4(Ipv4Addr::from(base ^ (1 << bit)));
        assert!(index.contains(addr), "host bit {bit} should stay inside");
    }
    // Any network bit takes it outside
    for bit in 15..32 {
        let addr = IpAddr::V4(Ipv4Addr::from(base ^ (1 << bit)));
        assert!(!index.contains(addr), "network bit {bit} should leave the range");
    }
}

#[test]
fn test_host_route_matches_exactly_one_address() {
    let index = index_of("192.0.2.10/32\n");
    assert!(index.contains(v4(192, 0, 2, 10)));
    assert!(!index.contains(v4(192, 0, 2, 9)));
    assert!(!index.contains(v4(192, 0, 2, 11)));
}

#[test]
fn test_host_route_neighbours_covered_by_other_range() {
    let index = index_of("192.0.2.10/32\n192.0.2.8/31\n");
    assert!(index.contains(v4(192, 0, 2, 9)));
    assert!(index.contains(v4(192, 0, 2, 10)));
    assert!(!index.contains(v4(192, 0, 2, 11)));
}

#[test]
fn test_bare_address_entry_is_host_route() {
    let index = index_of("198.51.100.1\n");
    assert!(index.contains(v4(198, 51, 100, 1)));
    assert!(!index.contains(v4(198, 51, 100, 2)));
}

#[test]
fn test_unaligned_base_is_masked() {
    // Host bits in the table entry are ignored, as with the usual CIDR parsers
    let index = index_of("10.1.2.3/24\n");
    assert!(index.contains(v4(10, 1, 2, 0)));
    assert!(index.contains(v4(10, 1, 2, 255)));
    assert!(!index.contains(v4(10, 1, 3, 0)));
}

#[test]
fn test_zero_prefix_covers_family_only() {
    let index = index_of("0.0.0.0/0\n");
    assert!(index.contains(v4(0, 0, 0, 0)));
    assert!(index.contains(v4(255, 255, 255, 255)));
    assert!(!index.contains(IpAddr::V6(Ipv6Addr::LOCALHOST)));
}

#[test]
fn test_mixed_families_never_match() {
    let index = index_of("0.0.0.0/0\n2400:cb00::/32\n");
    assert!(index.contains(IpAddr::V6("2400:cb00:2048::1".parse().unwrap())));
    assert!(!index.contains(IpAddr::V6("2400:cb01::1".parse().unwrap())));

    let v4_only = index_of("1.1.1.0/24\n");
    // IPv4-mapped IPv6 is still an IPv6 address
    let mapped: Ipv6Addr = "::ffff:1.1.1.1".parse().unwrap();
    assert!(!v4_only.contains(IpAddr::V6(mapped)));
}

#[test]
fn test_ipv6_host_route() {
    let index = index_of("2001:db8::1/128\n");
    assert!(index.contains("2001:db8::1".parse().unwrap()));
    assert!(!index.contains("2001:db8::2".parse().unwrap()));
    assert!(!index.contains("2001:db8::".parse().unwrap()));
}

#[test]
fn test_overlapping_and_duplicate_ranges() {
    let index = index_of("104.16.0.0/12\n104.16.0.0/20\n104.16.0.0/20\n104.17.16.0/20\n");
    assert_eq!(index.v4_intervals(), 1);
    assert!(index.contains(v4(104, 17, 20, 1)));
    assert!(!index.contains(v4(104, 32, 0, 1)));
}

#[test]
fn test_adjacent_ranges_merge() {
    let index = index_of("10.0.0.0/25\n10.0.0.128/25\n10.0.2.0/24\n");
    assert_eq!(index.v4_intervals(), 2);
    assert!(index.contains(v4(10, 0, 0, 127)));
    assert!(index.contains(v4(10, 0, 0, 128)));
    assert!(!index.contains(v4(10, 0, 1, 0)));
}

#[test]
fn test_embedded_table_loads_with_one_skipped_entry() {
    let table = RangeTable::embedded();
    assert_eq!(table.len(), 878);
    assert_eq!(table.skipped().len(), 1);
    assert_eq!(table.skipped()[0].line, 409);
    assert!(table.skipped()[0].entry.contains('"'));
    assert!(table
        .ranges()
        .iter()
        .all(|range| matches!(range, IpNetwork::V4(_))));
}

#[test]
fn test_embedded_table_membership() {
    let index = RangeIndex::from_table(&RangeTable::embedded());

    assert!(index.contains(v4(1, 1, 1, 1)));
    assert!(index.contains(v4(1, 0, 0, 1)));
    assert!(index.contains(v4(104, 16, 0, 0)));
    assert!(index.contains(v4(173, 245, 48, 1)));
    // The malformed 162.159.128.0/17 entry is still covered by 162.158.0.0/15
    assert!(index.contains(v4(162, 159, 200, 1)));

    assert!(!index.contains(v4(8, 8, 8, 8)));
    assert!(!index.contains(v4(9, 9, 9, 9)));
    assert!(!index.contains(v4(127, 0, 0, 1)));
    assert!(!index.contains(v4(203, 0, 113, 7)));
    assert!(!index.contains(v4(104, 32, 0, 0)));
    assert!(!index.contains(IpAddr::V6(Ipv6Addr::LOCALHOST)));
}

#[test]
fn test_index_agrees_with_linear_scan() {
    let table = RangeTable::embedded();
    let index = RangeIndex::from_table(&table);
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);

    // Random addresses are mostly outside; probe around every range edge too
    for _ in 0..20_000 {
        let addr = IpAddr::V4(Ipv4Addr::from(rng.next_u32()));
        assert_eq!(index.contains(addr), naive_contains(table.ranges(), addr));
    }
    for range in table.ranges() {
        if let IpNetwork::V4(net) = range {
            let start = u32::from(net.network());
            let end = start | !u32::from(net.mask());
            for probe in [
                start.wrapping_sub(1),
                start,
                end,
                end.wrapping_add(1),
            ] {
                let addr = IpAddr::V4(Ipv4Addr::from(probe));
                assert_eq!(
                    index.contains(addr),
                    naive_contains(table.ranges(), addr),
                    "disagreement at {addr}"
                );
            }
        }
    }
}
