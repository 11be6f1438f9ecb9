use std::{
    fmt::Debug,
    iter::{self, FusedIterator},
    ops::Range,
    slice,
};

use either::Either;
use static_assertions::const_assert_eq;

use crate::{IndicesErr, Interval};

mod invert;
mod ranges;

pub use invert::{Gap, Gaps};
pub use ranges::Ranges;

/// An immutable, strictly ascending, duplicate-free set of indices.
///
/// An `IndexMask` describes which positions of a larger ordered collection
/// are present (the selected vertices of a mesh, the rows that passed a
/// filter) without owning any storage of its own. It either borrows an
/// explicit buffer of indices from the caller or notes that every index of a
/// single [`Interval`] is present. Which of the two a given mask uses is an
/// internal detail; every operation behaves identically on both.
///
/// Masks are three words, `Copy`, and cheap to slice. Operations that must
/// materialize new index values ([`slice_and_offset`], [`invert`]) write into
/// a caller-supplied scratch `Vec` and return a mask borrowing from it.
///
/// [`slice_and_offset`]: IndexMask::slice_and_offset
/// [`invert`]: IndexMask::invert
///
/// # Examples
///
/// ```
/// use index_mask::{IndexMask, Interval};
///
/// let indices = [2, 3, 4, 7, 8, 10];
/// let mask = IndexMask::from_sorted_unique_unchecked(&indices);
///
/// assert_eq!(mask.len(), 6);
/// assert!(mask.contains(7));
///
/// // Decompose into maximal contiguous ranges.
/// let runs: Vec<Interval> = mask.ranges().collect();
/// assert_eq!(
///     runs,
///     [Interval::new(2, 3), Interval::new(7, 2), Interval::new(10, 1)]
/// );
///
/// // Invert within a bounding interval.
/// let mut scratch = Vec::new();
/// let inverted = mask.invert(Interval::up_to(12), &mut scratch);
/// assert!(inverted.iter().eq([0usize, 1, 5, 6, 9, 11]));
/// ```
#[derive(Clone, Copy)]
pub struct IndexMask<'a> {
    repr: Repr<'a>,
}

#[derive(Clone, Copy)]
enum Repr<'a> {
    /// Every index of the interval is present; nothing is materialized.
    Interval(Interval),
    /// Strictly ascending, duplicate-free indices borrowed from the caller.
    /// Never empty; empty masks normalize to the `Interval` variant.
    Slice(&'a [usize]),
}

const_assert_eq!(size_of::<IndexMask<'static>>(), 3 * size_of::<usize>());

impl<'a> IndexMask<'a> {
    /// A mask containing no indices.
    pub const EMPTY: Self = Self {
        repr: Repr::Interval(Interval::new(0, 0)),
    };

    /// Wraps a strictly ascending, duplicate-free buffer of indices.
    ///
    /// The buffer is borrowed, never copied. Ascent is verified under
    /// `debug_assertions` only; release builds trust the caller, and every
    /// operation on a mask over an unsorted buffer will misbehave. Use the
    /// [`TryFrom`] impl to validate untrusted input.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::IndexMask;
    ///
    /// let indices = [1, 4, 5, 6];
    /// let mask = IndexMask::from_sorted_unique_unchecked(&indices);
    /// assert!(mask.iter().eq([1usize, 4, 5, 6]));
    /// ```
    pub fn from_sorted_unique_unchecked(indices: &'a [usize]) -> Self {
        debug_assert!(
            indices.is_sorted_by(|a, b| a < b),
            "indices must be strictly ascending"
        );
        Self::from_ascending(indices)
    }

    /// Canonicalizing constructor: ascent is already established.
    fn from_ascending(indices: &'a [usize]) -> Self {
        if indices.is_empty() {
            Self::EMPTY
        } else {
            Self { repr: Repr::Slice(indices) }
        }
    }

    /// Returns the number of indices in the mask.
    #[inline]
    pub fn len(&self) -> usize {
        match self.repr {
            Repr::Interval(interval) => interval.len(),
            Repr::Slice(indices) => indices.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the mask contains `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::IndexMask;
    ///
    /// let mask = IndexMask::from(2..5);
    /// assert!(mask.contains(4));
    /// assert!(!mask.contains(5));
    /// ```
    #[inline]
    pub fn contains(&self, value: usize) -> bool {
        self.position(value).is_some()
    }

    /// Returns the position of `value` within the mask, if present.
    pub fn position(&self, value: usize) -> Option<usize> {
        match self.repr {
            Repr::Interval(interval) => {
                if interval.contains(value) {
                    Some(value - interval.start())
                } else {
                    None
                }
            }
            Repr::Slice(indices) => indices.binary_search(&value).ok(),
        }
    }

    /// Returns the index stored at `position`.
    pub fn get(&self, position: usize) -> Option<usize> {
        match self.repr {
            Repr::Interval(interval) => {
                if position < interval.len() {
                    Some(interval.start() + position)
                } else {
                    None
                }
            }
            Repr::Slice(indices) => indices.get(position).copied(),
        }
    }

    /// Returns the smallest index of the mask.
    #[inline]
    pub fn first(&self) -> Option<usize> {
        match self.repr {
            Repr::Interval(interval) => interval.first(),
            Repr::Slice(indices) => indices.first().copied(),
        }
    }

    /// Returns the largest index of the mask.
    #[inline]
    pub fn last(&self) -> Option<usize> {
        match self.repr {
            Repr::Interval(interval) => interval.last(),
            Repr::Slice(indices) => indices.last().copied(),
        }
    }

    /// Returns `true` if every index of the mask lies within `universe`.
    ///
    /// Ascent makes this a first/last check, not a scan.
    pub fn contained_in(&self, universe: Interval) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => universe.contains(first) && universe.contains(last),
            _ => true,
        }
    }

    /// Returns the mask as a single [`Interval`], if its indices are
    /// contiguous.
    ///
    /// The empty mask is contiguous.
    pub fn as_interval(&self) -> Option<Interval> {
        match self.repr {
            Repr::Interval(interval) => Some(interval),
            Repr::Slice(indices) => match (indices.first(), indices.last()) {
                // ascent makes contiguity a first/last check
                (Some(&first), Some(&last)) if last - first == indices.len() - 1 => {
                    Some(Interval::new(first, indices.len()))
                }
                _ => None,
            },
        }
    }

    /// Returns `true` if adjacent indices of the mask all differ by exactly
    /// one, i.e. the mask covers a single [`Interval`].
    ///
    /// This inspects the stored indices; it does not depend on which
    /// representation the mask happens to use.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::IndexMask;
    ///
    /// let contiguous = [4, 5, 6];
    /// assert!(IndexMask::from_sorted_unique_unchecked(&contiguous).is_interval());
    ///
    /// let gapped = [4, 6, 7];
    /// assert!(!IndexMask::from_sorted_unique_unchecked(&gapped).is_interval());
    ///
    /// assert!(IndexMask::EMPTY.is_interval());
    /// ```
    #[inline]
    pub fn is_interval(&self) -> bool {
        self.as_interval().is_some()
    }

    /// Returns the sub-mask at `positions`.
    ///
    /// Positions index into the ordered sequence of stored indices, not into
    /// their values: position `0` is the smallest stored index. The result
    /// borrows from the same storage as `self`; nothing is copied.
    ///
    /// Panics if `positions` extends past `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::IndexMask;
    ///
    /// let indices = [2, 3, 4, 7, 8, 10];
    /// let mask = IndexMask::from_sorted_unique_unchecked(&indices);
    /// assert!(mask.slice(1..4).iter().eq([3usize, 4, 7]));
    /// ```
    pub fn slice(&self, positions: Range<usize>) -> IndexMask<'a> {
        assert!(
            positions.start <= positions.end && positions.end <= self.len(),
            "slice positions {positions:?} out of bounds for mask of len {}",
            self.len()
        );
        if positions.is_empty() {
            return Self::EMPTY;
        }
        match self.repr {
            Repr::Interval(interval) => {
                Interval::new(interval.start() + positions.start, positions.len()).into()
            }
            Repr::Slice(indices) => Self { repr: Repr::Slice(&indices[positions]) },
        }
    }

    /// Slices to `positions`, then renormalizes the sub-mask to start at
    /// zero.
    ///
    /// The sub-mask's first index becomes the offset subtracted from every
    /// index. Three cases avoid touching `scratch` at all: an empty sub-mask,
    /// a contiguous sub-mask (which collapses to the interval `[0, len)`),
    /// and a sub-mask that already starts at zero. Otherwise `scratch`'s
    /// prior contents are discarded and the returned mask borrows from it.
    ///
    /// Panics if `positions` extends past `len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use index_mask::IndexMask;
    ///
    /// let indices = [4, 6, 7, 9];
    /// let mask = IndexMask::from_sorted_unique_unchecked(&indices);
    ///
    /// let mut scratch = Vec::new();
    /// let tail = mask.slice_and_offset(1..4, &mut scratch);
    /// assert!(tail.iter().eq([0usize, 1, 3]));
    /// ```
    pub fn slice_and_offset<'s>(
        &self,
        positions: Range<usize>,
        scratch: &'s mut Vec<usize>,
    ) -> IndexMask<'s>
    where
        'a: 's,
    {
        let sliced = self.slice(positions);
        match sliced.repr {
            Repr::Interval(interval) => Interval::up_to(interval.len()).into(),
            Repr::Slice(indices) if sliced.is_interval() => Interval::up_to(indices.len()).into(),
            Repr::Slice(indices) => {
                let offset = indices[0];
                if offset == 0 {
                    sliced
                } else {
                    scratch.clear();
                    scratch.extend(indices.iter().map(|&index| index - offset));
                    IndexMask::from_ascending(scratch.as_slice())
                }
            }
        }
    }

    /// Ascending iterator over the indices of the mask.
    #[inline]
    pub fn iter(&self) -> Indices<'a> {
        let inner = match self.repr {
            Repr::Interval(interval) => Either::Left(interval.iter()),
            Repr::Slice(indices) => Either::Right(indices.iter().copied()),
        };
        Indices { inner }
    }
}

impl Default for IndexMask<'_> {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<Interval> for IndexMask<'_> {
    fn from(interval: Interval) -> Self {
        if interval.is_empty() {
            Self::EMPTY
        } else {
            Self { repr: Repr::Interval(interval) }
        }
    }
}

impl From<Range<usize>> for IndexMask<'_> {
    fn from(range: Range<usize>) -> Self {
        Interval::from(range).into()
    }
}

impl<'a> TryFrom<&'a [usize]> for IndexMask<'a> {
    type Error = IndicesErr;

    /// Validating form of [`IndexMask::from_sorted_unique_unchecked`].
    fn try_from(indices: &'a [usize]) -> Result<Self, Self::Error> {
        for (position, pair) in indices.windows(2).enumerate() {
            if pair[1] == pair[0] {
                return Err(IndicesErr::Duplicate {
                    position: position + 1,
                    value: pair[1],
                });
            }
            if pair[1] < pair[0] {
                return Err(IndicesErr::NotAscending {
                    position: position + 1,
                    value: pair[1],
                });
            }
        }
        Ok(Self::from_ascending(indices))
    }
}

/// Masks compare by their logical contents; an interval-represented mask
/// equals a slice-represented mask over the same indices.
impl PartialEq for IndexMask<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self.as_interval(), other.as_interval()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => itertools::equal(self.iter(), other.iter()),
            _ => false,
        }
    }
}

impl Eq for IndexMask<'_> {}

impl Debug for IndexMask<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.repr {
            Repr::Interval(interval) => {
                write!(f, "IndexMask({}..{})", interval.start(), interval.end())
            }
            Repr::Slice(indices) => {
                write!(f, "IndexMask(")?;
                f.debug_list().entries(indices).finish()?;
                write!(f, ")")
            }
        }
    }
}

impl<'a> IntoIterator for IndexMask<'a> {
    type Item = usize;
    type IntoIter = Indices<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &IndexMask<'a> {
    type Item = usize;
    type IntoIter = Indices<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the indices of an [`IndexMask`].
#[must_use]
#[derive(Clone, Debug)]
pub struct Indices<'a> {
    inner: Either<Range<usize>, iter::Copied<slice::Iter<'a, usize>>>,
}

impl Iterator for Indices<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Indices<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Indices<'_> {}

impl FusedIterator for Indices<'_> {}
