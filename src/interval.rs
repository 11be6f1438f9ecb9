use std::{fmt::Debug, ops::Range};

/// A half-open interval of indices `[start, start + len)`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Interval {
    start: usize,
    len: usize,
}

impl Interval {
    /// Constructs the interval `[start, start + len)`.
    ///
    /// Panics if the end would overflow `usize`.
    pub const fn new(start: usize, len: usize) -> Self {
        assert!(
            start.checked_add(len).is_some(),
            "interval end overflows usize"
        );
        Self { start, len }
    }

    /// Constructs the interval `[0, len)`.
    #[inline]
    pub const fn up_to(len: usize) -> Self {
        Self::new(0, len)
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// One past the largest index of the interval.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub const fn contains(&self, value: usize) -> bool {
        self.start <= value && value < self.end()
    }

    #[inline]
    pub fn first(&self) -> Option<usize> {
        (self.len > 0).then_some(self.start)
    }

    #[inline]
    pub fn last(&self) -> Option<usize> {
        self.len.checked_sub(1).map(|offset| self.start + offset)
    }

    /// Ascending iterator over the indices of the interval.
    #[inline]
    pub fn iter(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl Debug for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({}..{})", self.start, self.end())
    }
}

impl From<Range<usize>> for Interval {
    fn from(range: Range<usize>) -> Self {
        assert!(range.start <= range.end, "range end before range start");
        Self::new(range.start, range.end - range.start)
    }
}

impl From<Interval> for Range<usize> {
    fn from(interval: Interval) -> Self {
        interval.iter()
    }
}

impl IntoIterator for Interval {
    type Item = usize;
    type IntoIter = Range<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_accessors() {
        let interval = Interval::new(2, 3);
        assert_eq!(interval.start(), 2);
        assert_eq!(interval.len(), 3);
        assert_eq!(interval.end(), 5);
        assert!(!interval.is_empty());
        assert_eq!(interval.first(), Some(2));
        assert_eq!(interval.last(), Some(4));
        itertools::assert_equal(interval.iter(), 2..5);
    }

    #[test]
    fn test_interval_empty() {
        let empty = Interval::new(7, 0);
        assert!(empty.is_empty());
        assert_eq!(empty.end(), 7);
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
        assert_eq!(empty.iter().count(), 0);
        assert!(Interval::default().is_empty());
    }

    #[test]
    fn test_interval_contains() {
        let interval = Interval::up_to(4);
        assert!(interval.contains(0));
        assert!(interval.contains(3));
        assert!(!interval.contains(4));
        assert!(!Interval::new(2, 2).contains(1));
        assert!(!Interval::new(2, 0).contains(2));
    }

    #[test]
    fn test_interval_range_conversions() {
        assert_eq!(Interval::from(2..5), Interval::new(2, 3));
        assert_eq!(Range::from(Interval::new(2, 3)), 2..5);
        assert_eq!(Interval::from(5..5), Interval::new(5, 0));
        itertools::assert_equal(Interval::new(1, 2), [1usize, 2]);
    }

    #[test]
    fn test_interval_debug() {
        assert_eq!(format!("{:?}", Interval::new(2, 3)), "Interval(2..5)");
    }

    #[test]
    #[should_panic(expected = "interval end overflows usize")]
    fn test_interval_overflowing_end() {
        let _ = Interval::new(usize::MAX, 2);
    }
}
