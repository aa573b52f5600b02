//! Range membership index.
//!
//! Ranges are flattened into inclusive `[network, broadcast]` intervals in the
//! address family's native integer width, sorted, and merged, so a lookup is a
//! single binary search. IPv4 and IPv6 live in separate tables and are never
//! compared with each other.

use std::net::IpAddr;

use ipnetwork::IpNetwork;

use super::table::RangeTable;

/// Integer form of an address family.
trait AddressBits: Copy + Ord {
    fn successor(self) -> Option<Self>;
}

impl AddressBits for u32 {
    fn successor(self) -> Option<Self> {
        self.checked_add(1)
    }
}

impl AddressBits for u128 {
    fn successor(self) -> Option<Self> {
        self.checked_add(1)
    }
}

/// Answers "is this address inside any configured range?".
///
/// Immutable once built; share it across tasks with `Arc`.
#[derive(Debug, Clone, Default)]
pub struct RangeIndex {
    v4: Vec<(u32, u32)>,
    v6: Vec<(u128, u128)>,
}

impl RangeIndex {
    /// Builds an index over the given ranges. Overlapping, adjacent and
    /// duplicate ranges are fine.
    pub fn new(ranges: &[IpNetwork]) -> Self {
        let mut v4 = Vec::new();
        let mut v6 = Vec::new();

        for range in ranges {
            match range {
                IpNetwork::V4(net) => {
                    let mask = u32::from(net.mask());
                    let start = u32::from(net.network());
                    v4.push((start, start | !mask));
                }
                IpNetwork::V6(net) => {
                    let mask = u128::from(net.mask());
                    let start = u128::from(net.network());
                    v6.push((start, start | !mask));
                }
            }
        }

        RangeIndex {
            v4: merge(v4),
            v6: merge(v6),
        }
    }

    /// Builds an index over every parsed range of `table`.
    pub fn from_table(table: &RangeTable) -> Self {
        Self::new(table.ranges())
    }

    /// True iff `addr` falls within at least one range of the same family.
    pub fn contains(&self, addr: IpAddr) -> bool {
        match addr {
            IpAddr::V4(v4) => lookup(&self.v4, u32::from(v4)),
            IpAddr::V6(v6) => lookup(&self.v6, u128::from(v6)),
        }
    }

    /// Number of disjoint IPv4 intervals after merging.
    pub fn v4_intervals(&self) -> usize {
        self.v4.len()
    }

    /// Number of disjoint IPv6 intervals after merging.
    pub fn v6_intervals(&self) -> usize {
        self.v6.len()
    }

    /// True if the index holds no ranges of either family.
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

fn merge<T: AddressBits>(mut intervals: Vec<(T, T)>) -> Vec<(T, T)> {
    intervals.sort_unstable();

    let mut merged: Vec<(T, T)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            // Overlapping or directly adjacent
            let touches = match last.1.successor() {
                Some(next) => start <= next,
                None => true,
            };
            if touches {
                if end > last.1 {
                    last.1 = end;
                }
                continue;
            }
        }
        merged.push((start, end));
    }
    merged
}

fn lookup<T: AddressBits>(intervals: &[(T, T)], addr: T) -> bool {
    let idx = intervals.partition_point(|&(start, _)| start <= addr);
    idx > 0 && addr <= intervals[idx - 1].1
}
