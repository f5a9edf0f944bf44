//! Row Packer: splits one tracing pass of a character into fixed-width rows.
//!
//! A pass is the stroke-by-stroke sequence `TraceStep(0) .. TraceStep(n - 1)`. Short
//! characters fit in a single row and the rest of the row is padded with fillers.
//! Long characters (more strokes than cells per row) wrap across
//! `ceil(n / grid_width)` rows; only the tail of the last row is padded.
//! A character with no stroke data still gets one row of fillers.

use crate::layout::cells::{CellKind, RowTemplate};

/// Packs one tracing pass of a character with `stroke_count` strokes into rows of
/// `grid_width` cells.
///
/// Pure function of its inputs. `grid_width` must be at least 1; a zero width is a caller
/// contract violation and is treated as 1 so that no empty rows are ever produced.
pub fn pack(stroke_count: usize, grid_width: usize) -> Vec<RowTemplate> {
    let width = grid_width.max(1);

    if stroke_count == 0 {
        return vec![RowTemplate::filler(width)];
    }

    let mut sequence: Vec<CellKind> = (0..stroke_count)
        .map(|stroke_index| CellKind::TraceStep { stroke_index })
        .collect();

    let remainder = stroke_count % width;
    if remainder != 0 {
        sequence.extend(std::iter::repeat(CellKind::Filler).take(width - remainder));
    }

    sequence
        .chunks(width)
        .map(|chunk| RowTemplate::from_cells(chunk.to_vec()))
        .collect()
}

/// A character is complex when one tracing pass needs more than one row.
pub fn is_complex(stroke_count: usize, grid_width: usize) -> bool {
    stroke_count > grid_width
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn step(i: usize) -> CellKind {
        CellKind::TraceStep { stroke_index: i }
    }

    // ── shape of the output ─────────────────────────────────────────────────

    #[test]
    fn test_every_row_has_grid_width_cells() {
        for grid_width in 1usize..=16 {
            for stroke_count in 0..=40 {
                let rows = pack(stroke_count, grid_width);
                assert!(!rows.is_empty());
                for row in &rows {
                    assert_eq!(
                        row.cells().len(),
                        grid_width,
                        "strokes={stroke_count} width={grid_width}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_short_character_uses_exactly_one_row() {
        for grid_width in 1usize..=16 {
            for stroke_count in 0..=grid_width {
                assert_eq!(pack(stroke_count, grid_width).len(), 1);
            }
        }
    }

    #[test]
    fn test_long_character_row_count_is_ceiling() {
        for grid_width in 1usize..=16 {
            for stroke_count in (grid_width + 1)..=40 {
                let expected = stroke_count.div_ceil(grid_width);
                assert_eq!(pack(stroke_count, grid_width).len(), expected);
            }
        }
    }

    #[test]
    fn test_trace_steps_appear_once_in_order() {
        for grid_width in 1usize..=16 {
            for stroke_count in 0..=40 {
                let steps: Vec<usize> = pack(stroke_count, grid_width)
                    .iter()
                    .flat_map(|row| row.trace_steps().collect::<Vec<_>>())
                    .collect();
                assert_eq!(steps, (0..stroke_count).collect::<Vec<_>>());
            }
        }
    }

    // ── concrete layouts ─────────────────────────────────────────────────────

    #[test]
    fn test_empty_strokes_give_one_filler_row() {
        let rows = pack(0, 6);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].cells().iter().all(CellKind::is_filler));
    }

    #[test]
    fn test_short_character_padded_with_fillers() {
        let rows = pack(3, 5);
        assert_eq!(
            rows[0].cells(),
            &[step(0), step(1), step(2), CellKind::Filler, CellKind::Filler]
        );
    }

    #[test]
    fn test_exact_fit_has_no_fillers() {
        let rows = pack(4, 4);
        assert_eq!(rows[0].cells(), &[step(0), step(1), step(2), step(3)]);
    }

    #[test]
    fn test_long_character_pads_only_last_row() {
        let rows = pack(10, 4);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].cells(), &[step(0), step(1), step(2), step(3)]);
        assert_eq!(rows[1].cells(), &[step(4), step(5), step(6), step(7)]);
        assert_eq!(
            rows[2].cells(),
            &[step(8), step(9), CellKind::Filler, CellKind::Filler]
        );
    }

    #[test]
    fn test_evenly_divisible_long_character_has_no_padding() {
        let rows = pack(16, 8);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.cells().iter().all(|c| !c.is_filler())));
    }

    #[test]
    fn test_zero_width_does_not_panic() {
        let rows = pack(3, 0);
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.cells().len() == 1));
    }

    #[test]
    fn test_is_complex_boundary() {
        assert!(!is_complex(8, 8));
        assert!(is_complex(9, 8));
        assert!(!is_complex(0, 4));
    }
}
