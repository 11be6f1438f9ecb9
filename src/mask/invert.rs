use std::iter::FusedIterator;

use crate::{IndexMask, Interval};

use super::ranges::Ranges;

impl<'a> IndexMask<'a> {
    /// Iterates over the maximal absent ranges of the mask within `universe`.
    ///
    /// Gaps are yielded ascending: before the first present range, between
    /// consecutive present ranges, and after the last one. A present range
    /// flush with a universe boundary emits no gap there. Each [`Gap`]
    /// carries the count of present indices preceding it, which correlates
    /// positions in the inverted set back to the mask.
    ///
    /// Panics if the mask is not [`contained_in`] the universe.
    ///
    /// [`contained_in`]: IndexMask::contained_in
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::{Gap, IndexMask, Interval};
    ///
    /// let indices = [2, 3, 4, 7, 8, 10];
    /// let mask = IndexMask::from_sorted_unique_unchecked(&indices);
    ///
    /// let gaps: Vec<Gap> = mask.gaps(Interval::up_to(12)).collect();
    /// assert_eq!(gaps[0], Gap { interval: Interval::new(0, 2), skipped: 0 });
    /// assert_eq!(gaps[1], Gap { interval: Interval::new(5, 2), skipped: 3 });
    /// ```
    pub fn gaps(&self, universe: Interval) -> Gaps<'a> {
        assert!(
            self.contained_in(universe),
            "mask extends outside the universe {universe:?}"
        );
        Gaps {
            runs: self.ranges(),
            cursor: universe.start(),
            end: universe.end(),
            skipped: 0,
        }
    }

    /// Computes the complement of the mask within `universe`.
    ///
    /// Two cases allocate nothing and leave `scratch` untouched: a mask
    /// covering the whole universe inverts to the empty mask, and an empty
    /// mask inverts to the universe itself. Otherwise `scratch`'s prior
    /// contents are discarded, the absent indices are written into it in
    /// ascending order, and the returned mask borrows from it.
    ///
    /// Panics if the mask is not [`contained_in`] the universe.
    ///
    /// [`contained_in`]: IndexMask::contained_in
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::{IndexMask, Interval};
    ///
    /// let indices = [2, 3, 4, 7, 8, 10];
    /// let mask = IndexMask::from_sorted_unique_unchecked(&indices);
    ///
    /// let mut scratch = Vec::new();
    /// let inverted = mask.invert(Interval::up_to(12), &mut scratch);
    /// assert!(inverted.iter().eq([0usize, 1, 5, 6, 9, 11]));
    /// ```
    pub fn invert<'s>(&self, universe: Interval, scratch: &'s mut Vec<usize>) -> IndexMask<'s>
    where
        'a: 's,
    {
        assert!(
            self.contained_in(universe),
            "mask extends outside the universe {universe:?}"
        );
        if self.len() == universe.len() {
            // containment plus equal sizes: the mask is the whole universe
            return IndexMask::EMPTY;
        }
        if self.is_empty() {
            return universe.into();
        }
        scratch.clear();
        scratch.extend(self.gaps(universe).flat_map(|gap| gap.interval));
        IndexMask::from_ascending(scratch.as_slice())
    }
}

/// A maximal absent range of an [`IndexMask`], yielded by
/// [`IndexMask::gaps`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Gap {
    /// The absent indices.
    pub interval: Interval,
    /// How many present indices precede this gap.
    pub skipped: usize,
}

/// Iterator over the absent ranges of an [`IndexMask`] within a bounding
/// interval, produced by [`IndexMask::gaps`].
#[must_use]
#[derive(Clone, Debug)]
pub struct Gaps<'a> {
    runs: Ranges<'a>,
    cursor: usize,
    end: usize,
    skipped: usize,
}

impl Iterator for Gaps<'_> {
    type Item = Gap;

    fn next(&mut self) -> Option<Gap> {
        for run in self.runs.by_ref() {
            let gap_start = self.cursor;
            let skipped = self.skipped;
            self.cursor = run.end();
            self.skipped += run.len();
            if run.start() > gap_start {
                return Some(Gap {
                    interval: Interval::new(gap_start, run.start() - gap_start),
                    skipped,
                });
            }
        }
        if self.cursor < self.end {
            let tail = Gap {
                interval: Interval::new(self.cursor, self.end - self.cursor),
                skipped: self.skipped,
            };
            self.cursor = self.end;
            return Some(tail);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // at most one gap per remaining run, plus the tail
        let (_, runs) = self.runs.size_hint();
        (0, runs.map(|upper| upper + 1))
    }
}

impl FusedIterator for Gaps<'_> {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use proptest::{collection::hash_set, proptest};

    use crate::testutil::check_mask;

    use super::*;

    #[test]
    fn test_gaps_worked_example() {
        let indices = [2, 3, 4, 7, 8, 10];
        let mask = IndexMask::from_sorted_unique_unchecked(&indices);
        itertools::assert_equal(
            mask.gaps(Interval::up_to(12)),
            [
                Gap { interval: Interval::new(0, 2), skipped: 0 },
                Gap { interval: Interval::new(5, 2), skipped: 3 },
                Gap { interval: Interval::new(9, 1), skipped: 5 },
                Gap { interval: Interval::new(11, 1), skipped: 6 },
            ],
        );
    }

    #[test]
    fn test_gaps_flush_boundaries() {
        let indices = [0, 1, 2, 5, 6, 9];
        let mask = IndexMask::from_sorted_unique_unchecked(&indices);
        itertools::assert_equal(
            mask.gaps(Interval::up_to(10)),
            [
                Gap { interval: Interval::new(3, 2), skipped: 3 },
                Gap { interval: Interval::new(7, 2), skipped: 5 },
            ],
        );
    }

    #[test]
    fn test_gaps_offset_universe() {
        let indices = [5, 7];
        let mask = IndexMask::from_sorted_unique_unchecked(&indices);
        itertools::assert_equal(
            mask.gaps(Interval::new(4, 5)),
            [
                Gap { interval: Interval::new(4, 1), skipped: 0 },
                Gap { interval: Interval::new(6, 1), skipped: 1 },
                Gap { interval: Interval::new(8, 1), skipped: 2 },
            ],
        );
    }

    #[test]
    fn test_gaps_empty_mask() {
        itertools::assert_equal(
            IndexMask::EMPTY.gaps(Interval::new(3, 4)),
            [Gap { interval: Interval::new(3, 4), skipped: 0 }],
        );
        assert_eq!(IndexMask::EMPTY.gaps(Interval::up_to(0)).next(), None);
    }

    #[test]
    fn test_invert_worked_example() {
        let indices = [2, 3, 4, 7, 8, 10];
        let mask = IndexMask::from_sorted_unique_unchecked(&indices);
        let mut scratch = Vec::new();
        let inverted = mask.invert(Interval::up_to(12), &mut scratch);
        check_mask(inverted, &[0, 1, 5, 6, 9, 11]);
    }

    #[test]
    fn test_invert_empty_mask() {
        let mut scratch = vec![99];
        let inverted = IndexMask::EMPTY.invert(Interval::new(2, 5), &mut scratch);
        assert_eq!(inverted, IndexMask::from(2..7));
        // the no-allocation paths leave scratch alone
        assert_eq!(scratch, [99]);
    }

    #[test]
    fn test_invert_full_mask() {
        let indices = [2, 3, 4];
        let mask = IndexMask::from_sorted_unique_unchecked(&indices);
        let mut scratch = vec![99];
        let inverted = mask.invert(Interval::new(2, 3), &mut scratch);
        assert!(inverted.is_empty());
        assert_eq!(scratch, [99]);

        let interval_mask = IndexMask::from(4..9);
        assert!(interval_mask.invert(Interval::new(4, 5), &mut scratch).is_empty());
    }

    #[test]
    fn test_invert_interval_repr() {
        let mask = IndexMask::from(3..6);
        let mut scratch = Vec::new();
        let inverted = mask.invert(Interval::up_to(8), &mut scratch);
        check_mask(inverted, &[0, 1, 2, 6, 7]);
    }

    #[test]
    #[should_panic(expected = "outside the universe")]
    fn test_invert_uncontained_mask() {
        let indices = [2, 3, 12];
        let mask = IndexMask::from_sorted_unique_unchecked(&indices);
        let mut scratch = Vec::new();
        let _ = mask.invert(Interval::up_to(12), &mut scratch);
    }

    proptest! {
        #[test]
        fn test_invert_matches_filter(set in hash_set(0usize..512, 0..128)) {
            let indices = set.iter().copied().sorted().collect_vec();
            let mask = IndexMask::from_sorted_unique_unchecked(&indices);
            let universe = Interval::up_to(512);
            let mut scratch = Vec::new();
            let inverted = mask.invert(universe, &mut scratch);
            itertools::assert_equal(
                inverted.iter(),
                universe.iter().filter(|value| !set.contains(value)),
            );
        }

        #[test]
        fn test_invert_involution(set in hash_set(0usize..256, 0..128)) {
            let indices = set.iter().copied().sorted().collect_vec();
            let mask = IndexMask::from_sorted_unique_unchecked(&indices);
            let universe = Interval::up_to(256);
            let mut scratch = Vec::new();
            let inverted = mask.invert(universe, &mut scratch);
            let mut scratch_back = Vec::new();
            let back = inverted.invert(universe, &mut scratch_back);
            assert_eq!(back, mask);
        }

        #[test]
        fn test_gaps_skip_accounting(set in hash_set(0usize..512, 0..128)) {
            let indices = set.iter().copied().sorted().collect_vec();
            let mask = IndexMask::from_sorted_unique_unchecked(&indices);
            let universe = Interval::up_to(512);

            let mut gap_total = 0;
            for gap in mask.gaps(universe) {
                assert_eq!(
                    gap.skipped,
                    indices.partition_point(|&index| index < gap.interval.start())
                );
                for value in gap.interval {
                    assert!(!mask.contains(value));
                }
                gap_total += gap.interval.len();
            }
            assert_eq!(gap_total + mask.len(), universe.len());
        }
    }
}
