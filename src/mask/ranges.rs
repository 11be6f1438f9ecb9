use std::iter::FusedIterator;

use crate::{IndexMask, Interval};

use super::Repr;

impl<'a> IndexMask<'a> {
    /// Decomposes the mask into its maximal contiguous ranges.
    ///
    /// The returned iterator yields ascending, non-adjacent [`Interval`]s
    /// whose concatenated indices are exactly the indices of the mask. An
    /// interval-represented mask yields its interval in one step; an explicit
    /// mask locates each range end by galloping search, probing `O(log L)`
    /// times per range of length `L` instead of scanning every index.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::{IndexMask, Interval};
    ///
    /// let indices = [2, 3, 4, 7, 8, 10];
    /// let mask = IndexMask::from_sorted_unique_unchecked(&indices);
    /// assert!(mask.ranges().eq([
    ///     Interval::new(2, 3),
    ///     Interval::new(7, 2),
    ///     Interval::new(10, 1),
    /// ]));
    /// ```
    #[inline]
    pub fn ranges(&self) -> Ranges<'a> {
        Ranges { rest: *self }
    }
}

/// Iterator over the maximal contiguous ranges of an [`IndexMask`], produced
/// by [`IndexMask::ranges`].
#[must_use]
#[derive(Clone, Debug)]
pub struct Ranges<'a> {
    rest: IndexMask<'a>,
}

impl Iterator for Ranges<'_> {
    type Item = Interval;

    fn next(&mut self) -> Option<Interval> {
        match self.rest.repr {
            Repr::Interval(interval) => {
                self.rest = IndexMask::EMPTY;
                if interval.is_empty() { None } else { Some(interval) }
            }
            Repr::Slice(indices) => {
                let end = run_len(indices);
                self.rest = IndexMask::from_ascending(&indices[end..]);
                Some(Interval::new(indices[0], end))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.rest.len();
        if len == 0 { (0, Some(0)) } else { (1, Some(len)) }
    }
}

impl FusedIterator for Ranges<'_> {}

/// Length of the longest contiguous prefix of `indices`.
///
/// Gallops: doubles the probe step while the prefix stays contiguous, then
/// refines with halving steps. A single index is trivially contiguous, so the
/// search starts past it.
fn run_len(indices: &[usize]) -> usize {
    debug_assert!(!indices.is_empty());
    let len = indices.len();
    let mut end = 1;
    let mut step = 1;
    loop {
        let probe = end + step;
        if probe > len || !contiguous(indices, probe) {
            break;
        }
        end = probe;
        step *= 2;
    }
    // the step that just failed needs no retry at this end
    step /= 2;
    while step > 0 {
        let probe = end + step;
        step /= 2;
        if probe > len || !contiguous(indices, probe) {
            continue;
        }
        end = probe;
    }
    end
}

/// Whether the first `len` indices form one contiguous run. Strict ascent
/// makes this a first/last check.
#[inline]
fn contiguous(indices: &[usize], len: usize) -> bool {
    indices[len - 1] - indices[0] == len - 1
}
