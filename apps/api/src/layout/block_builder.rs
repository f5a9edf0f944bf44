//! Block Builder: repeats one tracing pass to form a character's practice block.

use crate::layout::cells::{PracticeBlock, RowTemplate};
use crate::layout::row_packer::pack;

/// Number of tracing passes actually laid out. Zero or negative settings still print one.
pub fn effective_rows(tracing_rows: i32) -> usize {
    tracing_rows.max(1) as usize
}

/// Repeats the rows of one tracing pass `max(1, tracing_rows)` times, in order.
///
/// Every repetition is an owned value built from the template; no cell is shared
/// between repetitions.
pub fn build(pass: &[RowTemplate], tracing_rows: i32) -> PracticeBlock {
    let repetitions = effective_rows(tracing_rows);
    let mut block = Vec::with_capacity(pass.len() * repetitions);
    for _ in 0..repetitions {
        block.extend(pass.iter().cloned());
    }
    block
}

/// Packs and repeats in one step.
pub fn build_for_character(
    stroke_count: usize,
    grid_width: usize,
    tracing_rows: i32,
) -> PracticeBlock {
    build(&pack(stroke_count, grid_width), tracing_rows)
}
