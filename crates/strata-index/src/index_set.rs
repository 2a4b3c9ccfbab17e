//! Interval-compressed set of `u32` indices.
//!
//! [`IndexSet`] stores its members as sorted, disjoint, non-adjacent
//! [`NumericRange`]s, so contiguous runs of tree or sector indices cost one
//! entry no matter how long they are. Single values and whole ranges are
//! inserted and removed in `O(log R + k)` where `R` is the number of stored
//! ranges and `k` the number of ranges merged or split.

use std::collections::BTreeMap;

use crate::NumericRange;

/// A set of `u32` indices backed by coalesced ranges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexSet {
    /// `from -> to_inclusive`. Keys are sorted; entries never overlap and are
    /// separated by at least one absent value.
    ranges: BTreeMap<u32, u32>,
    /// Sum of all range lengths.
    count: u64,
}

impl IndexSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indices in the set.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of disjoint ranges used to store the set.
    #[must_use]
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
        self.count = 0;
    }

    pub fn add(&mut self, value: u32) {
        self.add_range(NumericRange::single(value));
    }

    pub fn remove(&mut self, value: u32) {
        self.remove_range(NumericRange::single(value));
    }

    /// Insert every value of `range`, coalescing with any stored range it
    /// overlaps or is adjacent to.
    pub fn add_range(&mut self, range: NumericRange) {
        let mut from = range.from();
        let mut to = range.to_inclusive();

        // Walk down from the last range starting at or right after `to`; ends
        // decrease along the way, so the first range ending before `from - 1`
        // stops the scan.
        let touching: Vec<(u32, u32)> = self
            .ranges
            .range(..=to.saturating_add(1))
            .rev()
            .take_while(|&(_, &end)| u64::from(end) + 1 >= u64::from(from))
            .map(|(&start, &end)| (start, end))
            .collect();

        for (start, end) in touching {
            self.ranges.remove(&start);
            self.count -= u64::from(end - start) + 1;
            from = from.min(start);
            to = to.max(end);
        }

        self.ranges.insert(from, to);
        self.count += u64::from(to - from) + 1;
    }

    /// Remove every value of `range`, splitting stored ranges that straddle
    /// either end.
    pub fn remove_range(&mut self, range: NumericRange) {
        let from = range.from();
        let to = range.to_inclusive();

        let overlapping: Vec<(u32, u32)> = self
            .ranges
            .range(..=to)
            .rev()
            .take_while(|&(_, &end)| end >= from)
            .map(|(&start, &end)| (start, end))
            .collect();

        for (start, end) in overlapping {
            self.ranges.remove(&start);
            self.count -= u64::from(end - start) + 1;
            if start < from {
                self.insert_disjoint(start, from - 1);
            }
            if end > to {
                self.insert_disjoint(to + 1, end);
            }
        }
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.ranges
            .range(..=value)
            .next_back()
            .is_some_and(|(_, &end)| end >= value)
    }

    /// Add every value of `other` to `self`.
    pub fn union_with(&mut self, other: &IndexSet) {
        for range in other.ranges() {
            self.add_range(range);
        }
    }

    /// Keep only the values that are also in `other`.
    pub fn intersect_with(&mut self, other: &IndexSet) {
        let mut kept = IndexSet::new();
        {
            let mut lhs = self.ranges().peekable();
            let mut rhs = other.ranges().peekable();
            while let (Some(&a), Some(&b)) = (lhs.peek(), rhs.peek()) {
                if let Some(shared) = a.intersection(&b) {
                    // Intersections of two normalized sets are already disjoint
                    // and non-adjacent.
                    kept.insert_disjoint(shared.from(), shared.to_inclusive());
                }
                if a.to_inclusive() < b.to_inclusive() {
                    lhs.next();
                } else {
                    rhs.next();
                }
            }
        }
        *self = kept;
    }

    /// Remove every value of `other` from `self`.
    pub fn difference_with(&mut self, other: &IndexSet) {
        for range in other.ranges() {
            if self.is_empty() {
                break;
            }
            self.remove_range(range);
        }
    }

    /// Whether the two sets share any value, without building the intersection.
    #[must_use]
    pub fn has_intersection_with(&self, other: &IndexSet) -> bool {
        let mut lhs = self.ranges().peekable();
        let mut rhs = other.ranges().peekable();
        while let (Some(&a), Some(&b)) = (lhs.peek(), rhs.peek()) {
            if a.overlaps(&b) {
                return true;
            }
            if a.to_inclusive() < b.to_inclusive() {
                lhs.next();
            } else {
                rhs.next();
            }
        }
        false
    }

    /// Stored ranges in ascending order.
    pub fn ranges(&self) -> impl Iterator<Item = NumericRange> + '_ {
        self.ranges
            .iter()
            .map(|(&from, &to)| NumericRange::new(from, to))
    }

    /// Every value in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges().flat_map(|range| range.values())
    }

    fn insert_disjoint(&mut self, from: u32, to: u32) {
        self.ranges.insert(from, to);
        self.count += u64::from(to - from) + 1;
    }
}

impl From<NumericRange> for IndexSet {
    fn from(range: NumericRange) -> Self {
        let mut set = IndexSet::new();
        set.add_range(range);
        set
    }
}

impl FromIterator<u32> for IndexSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut set = IndexSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<u32> for IndexSet {
    fn extend<I: IntoIterator<Item = u32>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl Extend<NumericRange> for IndexSet {
    fn extend<I: IntoIterator<Item = NumericRange>>(&mut self, iter: I) {
        for range in iter {
            self.add_range(range);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    use super::*;

    fn range(from: u32, count: u32) -> NumericRange {
        NumericRange::from_count(from, count).unwrap()
    }

    fn values(set: &IndexSet) -> Vec<u32> {
        set.values().collect()
    }

    /// Checks sorted, disjoint, non-adjacent storage and the cached count.
    fn assert_normalized(set: &IndexSet) {
        let ranges: Vec<_> = set.ranges().collect();
        for pair in ranges.windows(2) {
            assert!(
                u64::from(pair[0].to_inclusive()) + 1 < u64::from(pair[1].from()),
                "ranges {} and {} should have been merged",
                pair[0],
                pair[1]
            );
        }
        let total: u64 = ranges.iter().map(NumericRange::count).sum();
        assert_eq!(set.count(), total);
    }

    #[test]
    fn test_contains_all_elements_after_adding_range() {
        let mut set = IndexSet::new();
        set.add_range(range(11, 5));

        assert_eq!(set.count(), 5);
        for i in 0..11 {
            assert!(!set.contains(i));
        }
        for i in 11..16 {
            assert!(set.contains(i));
        }
        assert!(!set.contains(16));
    }

    #[test]
    fn test_remove_splits_range() {
        let mut set = IndexSet::new();
        set.add_range(range(1, 3));
        set.remove(2);

        assert_eq!(set.count(), 2);
        assert!(set.contains(1));
        assert!(!set.contains(2));
        assert!(set.contains(3));
        assert_eq!(set.range_count(), 2);
    }

    #[test]
    fn test_overlapping_adds_then_remove() {
        let mut set = IndexSet::new();
        set.add_range(range(3, 10));
        set.add_range(range(2, 12));
        set.remove_range(range(5, 2));

        assert_eq!(set.count(), 10);
        assert_eq!(values(&set), vec![2, 3, 4, 7, 8, 9, 10, 11, 12, 13]);
        assert_normalized(&set);
    }

    #[test]
    fn test_contained_range_does_not_change_set() {
        let mut set = IndexSet::new();
        set.add_range(NumericRange::new(4, 8));
        set.add_range(NumericRange::new(5, 7));

        assert_eq!(set.ranges().collect::<Vec<_>>(), vec![NumericRange::new(4, 8)]);
        assert_eq!(set.count(), 5);
    }

    #[test]
    fn test_bridging_range_merges_neighbours() {
        let mut set = IndexSet::new();
        set.add_range(NumericRange::new(4, 7));
        set.add_range(NumericRange::new(9, 11));
        set.add_range(NumericRange::new(5, 10));

        assert_eq!(
            set.ranges().collect::<Vec<_>>(),
            vec![NumericRange::new(4, 11)]
        );
        assert_eq!(set.count(), 8);
    }

    #[test]
    fn test_single_point_overlap_coalesces() {
        let mut set = IndexSet::new();
        set.add_range(NumericRange::new(1, 3));
        set.add_range(NumericRange::new(3, 3));
        assert_eq!(set.range_count(), 1);
        assert_eq!(set.count(), 3);
    }

    #[test]
    fn test_adjacent_values_coalesce() {
        let mut set = IndexSet::new();
        set.add(5);
        set.add(7);
        assert_eq!(set.range_count(), 2);
        set.add(6);
        assert_eq!(
            set.ranges().collect::<Vec<_>>(),
            vec![NumericRange::new(5, 7)]
        );
    }

    #[test]
    fn test_domain_edges() {
        let mut set = IndexSet::new();
        set.add(u32::MAX);
        set.add(u32::MAX - 1);
        set.add(0);
        assert_eq!(set.range_count(), 2);
        assert!(set.contains(u32::MAX));

        set.remove_range(NumericRange::new(u32::MAX, u32::MAX));
        assert!(!set.contains(u32::MAX));
        assert!(set.contains(u32::MAX - 1));
        assert_normalized(&set);
    }

    #[test]
    fn test_large_range_is_stored_compactly() {
        let mut set = IndexSet::new();
        set.add_range(NumericRange::new(0, 3_999_999_999));
        set.remove(2_000_000_000);
        assert_eq!(set.count(), 3_999_999_999);
        assert_eq!(set.range_count(), 2);
    }

    #[test]
    fn test_removing_absent_values_is_noop() {
        let mut set = IndexSet::new();
        set.add_range(NumericRange::new(10, 20));
        let before = set.clone();
        set.remove_range(NumericRange::new(0, 9));
        set.remove_range(NumericRange::new(21, 30));
        assert_eq!(set, before);
    }

    /// Random add/remove sequence must agree with a reference `BTreeSet`.
    #[test]
    fn test_random_adds_and_removes_match_reference() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(0x5eed);
        let mut expected = BTreeSet::new();
        let mut set = IndexSet::new();

        for _ in 0..10_000 {
            let value: u32 = rng.gen_range(0..=500);
            if rng.gen_bool(0.5) {
                set.add(value);
                expected.insert(value);
            } else {
                set.remove(value);
                expected.remove(&value);
            }
        }

        assert_eq!(values(&set), expected.iter().copied().collect::<Vec<_>>());
        for probe in 0..=520 {
            assert_eq!(set.contains(probe), expected.contains(&probe), "probe {probe}");
        }
        assert_normalized(&set);
    }

    /// Same as above but with random ranges instead of single values.
    #[test]
    fn test_random_range_operations_match_reference() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(7);
        let mut expected = BTreeSet::new();
        let mut set = IndexSet::new();

        for _ in 0..2_000 {
            let from: u32 = rng.gen_range(0..1_000);
            let count: u32 = rng.gen_range(1..40);
            let r = range(from, count);
            if rng.gen_bool(0.6) {
                set.add_range(r);
                expected.extend(r.values());
            } else {
                set.remove_range(r);
                for v in r.values() {
                    expected.remove(&v);
                }
            }
        }

        assert_eq!(values(&set), expected.iter().copied().collect::<Vec<_>>());
        assert_normalized(&set);
    }

    #[test]
    fn test_intersect_with_empty_yields_empty() {
        let mut set = IndexSet::from(range(0, 10));
        set.intersect_with(&IndexSet::new());
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
    }

    #[test]
    fn test_intersect_with_disjoint_yields_empty() {
        let mut set = IndexSet::from(range(0, 10));
        set.intersect_with(&IndexSet::from(range(20, 10)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_intersect_with_partial_overlap() {
        let mut set: IndexSet = [1, 3, 5, 7].into_iter().collect();
        let other = IndexSet::from(range(5, 3));
        set.intersect_with(&other);
        assert_eq!(values(&set), vec![5, 7]);
        assert_normalized(&set);
    }

    #[test]
    fn test_intersect_with_many_ranges() {
        let mut set = IndexSet::new();
        set.extend([
            NumericRange::new(0, 10),
            NumericRange::new(20, 30),
            NumericRange::new(40, 50),
        ]);
        let mut other = IndexSet::new();
        other.extend([NumericRange::new(5, 25), NumericRange::new(29, 45)]);

        set.intersect_with(&other);
        assert_eq!(
            set.ranges().collect::<Vec<_>>(),
            vec![
                NumericRange::new(5, 10),
                NumericRange::new(20, 25),
                NumericRange::new(29, 30),
                NumericRange::new(40, 45),
            ]
        );
        assert_normalized(&set);
    }

    #[test]
    fn test_union_with_copy_of_self_is_noop() {
        let mut set = IndexSet::from(range(5, 3));
        let copy = set.clone();
        set.union_with(&copy);
        assert_eq!(values(&set), vec![5, 6, 7]);
        assert_eq!(set, copy);
    }

    #[test]
    fn test_union_partially_overlapping() {
        let mut set = IndexSet::from(range(1, 3));
        set.union_with(&IndexSet::from(range(2, 3)));
        assert_eq!(values(&set), vec![1, 2, 3, 4]);
        assert_eq!(set.range_count(), 1);
    }

    #[test]
    fn test_clone_is_independent_both_ways() {
        let mut set = IndexSet::from(range(1, 5));
        let mut cloned = set.clone();
        assert_eq!(cloned, set);

        cloned.add(11);
        assert!(!set.contains(11));

        set.add(20);
        assert!(!cloned.contains(20));
    }

    #[test]
    fn test_has_intersection_with() {
        let set = IndexSet::from(range(1, 5));
        assert!(set.has_intersection_with(&IndexSet::from(range(3, 4))));
        assert!(!set.has_intersection_with(&IndexSet::from(range(10, 4))));
        assert!(!set.has_intersection_with(&IndexSet::new()));
    }

    #[test]
    fn test_has_intersection_with_interleaved_ranges() {
        let a: IndexSet = [0, 2, 4, 6, 8].into_iter().collect();
        let b: IndexSet = [1, 3, 5, 7, 9].into_iter().collect();
        assert!(!a.has_intersection_with(&b));

        let c: IndexSet = [1, 3, 8].into_iter().collect();
        assert!(a.has_intersection_with(&c));
    }

    #[test]
    fn test_difference_removes_exactly_the_overlap() {
        let mut set = IndexSet::from(range(1, 5));
        set.difference_with(&IndexSet::from(range(3, 5)));
        assert_eq!(values(&set), vec![1, 2]);
        assert_normalized(&set);
    }

    #[test]
    fn test_ranges_and_values_are_restartable() {
        let set: IndexSet = [1, 2, 3, 10].into_iter().collect();
        let first: Vec<_> = set.values().collect();
        let second: Vec<_> = set.values().collect();
        assert_eq!(first, second);
        assert_eq!(set.ranges().count(), 2);
        assert_eq!(set.ranges().count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut set = IndexSet::from(range(1, 5));
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
        assert!(!set.contains(1));
    }
}
