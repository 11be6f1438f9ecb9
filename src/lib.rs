//! Immutable, allocation-light sets of ascending indices.
//!
//! An [`IndexMask`] describes which positions of a larger ordered collection are present — the selected vertices of a mesh, the rows that survived a filter — as a borrowed view over a strictly ascending buffer of `usize` indices, or as a pure [`Interval`] when the indices happen to be contiguous.
//!
//! ## Key Features:
//!
//! - **Zero-copy views**: A mask never owns storage. Construction wraps an existing buffer, positional [`slice`](IndexMask::slice) returns a narrower view of the same buffer, and operations that must materialize new indices write into a caller-supplied scratch `Vec` and borrow from it.
//!
//! - **Range decomposition**: [`ranges`](IndexMask::ranges) splits a mask into its maximal contiguous ranges with a galloping search, probing logarithmically per range rather than visiting every index.
//!
//! - **Inversion**: [`invert`](IndexMask::invert) and [`gaps`](IndexMask::gaps) compute the complement of a mask within a bounding interval, with per-gap accounting of how many present indices precede each gap.

use thiserror::Error;

mod interval;
mod mask;

#[cfg(feature = "testutil")]
pub mod testutil;

pub use interval::Interval;
pub use mask::{Gap, Gaps, IndexMask, Indices, Ranges};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndicesErr {
    #[error("Index {value} at position {position} is not ascending")]
    NotAscending { position: usize, value: usize },

    #[error("Duplicate index {value} at position {position}")]
    Duplicate { position: usize, value: usize },
}
