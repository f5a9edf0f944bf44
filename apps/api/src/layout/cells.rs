//! Cell and row value types shared by the packer, the block builder and renderers.

use serde::{Deserialize, Serialize};

/// What a single practice cell shows.
///
/// `TraceStep` renders strokes `0..=stroke_index`, with `stroke_index` highlighted as the
/// active stroke and everything before it in the completed-stroke color.
/// `Filler` renders the whole character at reduced opacity with no highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellKind {
    TraceStep { stroke_index: usize },
    Filler,
}

#[cfg(test)]
impl CellKind {
    pub fn is_filler(&self) -> bool {
        matches!(self, CellKind::Filler)
    }
}

/// One printed row of cells. Always exactly `grid_width` cells long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowTemplate(Vec<CellKind>);

impl RowTemplate {
    pub(crate) fn from_cells(cells: Vec<CellKind>) -> Self {
        debug_assert!(!cells.is_empty(), "row templates are never empty");
        Self(cells)
    }

    /// A row of nothing but filler cells.
    pub fn filler(grid_width: usize) -> Self {
        Self::from_cells(vec![CellKind::Filler; grid_width])
    }
}

// Renderers read rows through the serialized form.
#[cfg(test)]
impl RowTemplate {
    pub fn cells(&self) -> &[CellKind] {
        &self.0
    }

    /// Stroke indices of the trace-step cells in this row, left to right.
    pub fn trace_steps(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().filter_map(|cell| match cell {
            CellKind::TraceStep { stroke_index } => Some(*stroke_index),
            CellKind::Filler => None,
        })
    }
}

/// All rows of one character's practice area, in print order.
pub type PracticeBlock = Vec<RowTemplate>;
