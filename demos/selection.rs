//! Walks a filtered vertex selection through slicing, range decomposition,
//! and inversion.

use index_mask::{IndexMask, Interval};

fn main() {
    // Vertices 0..64, minus two rejected bands.
    let selected: Vec<usize> = (0..64)
        .filter(|&vertex| !(20..24).contains(&vertex) && !(40..59).contains(&vertex))
        .collect();
    let mask = IndexMask::from_sorted_unique_unchecked(&selected);
    println!("selected {} of 64 vertices", mask.len());

    // The selection compresses into a handful of contiguous runs.
    println!("runs:");
    for run in mask.ranges() {
        println!("  {}..{} ({} vertices)", run.start(), run.end(), run.len());
    }

    // Complement within the full vertex range, with skip accounting.
    let universe = Interval::up_to(64);
    println!("gaps:");
    for gap in mask.gaps(universe) {
        println!(
            "  {}..{} after {} selected vertices",
            gap.interval.start(),
            gap.interval.end(),
            gap.skipped
        );
    }

    let mut scratch = Vec::new();
    let inverted = mask.invert(universe, &mut scratch);
    println!("inverted selection holds {} vertices", inverted.len());

    // Renormalize the back half of the selection to start at zero, e.g. to
    // index into a buffer that only holds those vertices.
    let mut tail_scratch = Vec::new();
    let tail = mask.slice_and_offset(mask.len() / 2..mask.len(), &mut tail_scratch);
    println!(
        "renormalized tail: first={:?} last={:?} len={}",
        tail.first(),
        tail.last(),
        tail.len()
    );
}
