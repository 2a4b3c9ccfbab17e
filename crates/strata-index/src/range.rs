//! Closed integer intervals with overlap, adjacency, union and intersection.

use std::fmt;
use std::ops::RangeInclusive;

/// A non-empty closed interval `[from, to_inclusive]` of `u32` indices.
///
/// Invariant: `from <= to_inclusive`. Empty ranges are not representable;
/// [`NumericRange::from_count`] returns `None` for a zero count instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumericRange {
    from: u32,
    to_inclusive: u32,
}

impl NumericRange {
    /// Create the range `[from, to_inclusive]`.
    ///
    /// # Panics
    ///
    /// Panics if `from > to_inclusive`.
    #[must_use]
    pub fn new(from: u32, to_inclusive: u32) -> Self {
        assert!(
            from <= to_inclusive,
            "range start {from} must not exceed end {to_inclusive}"
        );
        Self { from, to_inclusive }
    }

    /// Create the range holding only `value`.
    #[must_use]
    pub fn single(value: u32) -> Self {
        Self {
            from: value,
            to_inclusive: value,
        }
    }

    /// Create the range of `count` values starting at `from`.
    ///
    /// Returns `None` when `count` is zero or the range would run past `u32::MAX`.
    #[must_use]
    pub fn from_count(from: u32, count: u32) -> Option<Self> {
        let last_offset = count.checked_sub(1)?;
        let to_inclusive = from.checked_add(last_offset)?;
        Some(Self { from, to_inclusive })
    }

    /// First value in the range.
    #[must_use]
    pub fn from(&self) -> u32 {
        self.from
    }

    /// Last value in the range.
    #[must_use]
    pub fn to_inclusive(&self) -> u32 {
        self.to_inclusive
    }

    /// Number of values in the range. Never zero.
    #[must_use]
    pub fn count(&self) -> u64 {
        u64::from(self.to_inclusive - self.from) + 1
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        self.from <= value && value <= self.to_inclusive
    }

    /// Whether the two ranges share at least one value.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from <= other.to_inclusive && other.from <= self.to_inclusive
    }

    /// Whether the two ranges overlap or are directly adjacent, i.e. whether
    /// their union is a single range.
    #[must_use]
    pub fn touches(&self, other: &Self) -> bool {
        u64::from(self.from) <= u64::from(other.to_inclusive) + 1
            && u64::from(other.from) <= u64::from(self.to_inclusive) + 1
    }

    /// The smallest range covering both, or `None` if they do not [touch](Self::touches).
    #[must_use]
    pub fn union(&self, other: &Self) -> Option<Self> {
        self.touches(other).then(|| Self {
            from: self.from.min(other.from),
            to_inclusive: self.to_inclusive.max(other.to_inclusive),
        })
    }

    /// The values shared by both ranges, or `None` if they are disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        self.overlaps(other).then(|| Self {
            from: self.from.max(other.from),
            to_inclusive: self.to_inclusive.min(other.to_inclusive),
        })
    }

    /// Every value of the range in ascending order.
    #[must_use]
    pub fn values(&self) -> RangeInclusive<u32> {
        self.from..=self.to_inclusive
    }
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.from, self.to_inclusive)
    }
}
