use itertools::Itertools;
use rand::{RngExt, SeedableRng, rngs::StdRng, seq::index};

use crate::IndexMask;

/// Deterministic generator of ascending, duplicate-free index buffers.
pub struct MaskGen {
    rng: StdRng,
}

impl MaskGen {
    pub fn new(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// `len` unique indices sampled uniformly from `[0, universe)`.
    pub fn scattered(&mut self, universe: usize, len: usize) -> Vec<usize> {
        index::sample(&mut self.rng, universe, len)
            .into_iter()
            .sorted()
            .collect()
    }

    /// Indices grouped into runs: every `stride` indices start a run of
    /// random length in `[0, stride)`. Larger strides give longer runs and
    /// longer gaps.
    pub fn runs(&mut self, universe: usize, stride: usize) -> Vec<usize> {
        assert!(stride > 0, "stride must be positive");
        let rng = &mut self.rng;
        (0..universe)
            .step_by(stride)
            .flat_map(|start| {
                let run_len = rng.random_range(0..stride);
                start..universe.min(start + run_len)
            })
            .collect()
    }
}

/// Asserts the whole read surface of `mask` against a reference buffer.
#[track_caller]
pub fn check_mask(mask: IndexMask<'_>, expected: &[usize]) {
    assert_eq!(mask.len(), expected.len());
    assert_eq!(mask.is_empty(), expected.is_empty());
    assert_eq!(mask.first(), expected.first().copied());
    assert_eq!(mask.last(), expected.last().copied());

    itertools::assert_equal(mask.iter(), expected.iter().copied());
    itertools::assert_equal(mask.iter().rev(), expected.iter().rev().copied());
    assert_eq!(mask.iter().len(), expected.len());

    for (position, &index) in expected.iter().enumerate() {
        assert!(mask.contains(index));
        assert_eq!(mask.position(index), Some(position));
        assert_eq!(mask.get(position), Some(index));
    }
    assert_eq!(mask.get(expected.len()), None);

    // probe the inside of every hole between stored indices
    for pair in expected.windows(2) {
        if pair[1] - pair[0] > 1 {
            let absent = pair[0] + 1;
            assert!(!mask.contains(absent));
            assert_eq!(mask.position(absent), None);
        }
    }

    let contiguous = match (expected.first(), expected.last()) {
        (Some(first), Some(last)) => last - first == expected.len() - 1,
        _ => true,
    };
    assert_eq!(mask.is_interval(), contiguous);
}
