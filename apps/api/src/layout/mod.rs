// Worksheet layout engine: row packing, practice-block repetition, page planning.
// Everything here is pure and synchronous; no I/O, no shared state.

pub mod block_builder;
pub mod cells;
pub mod page_planner;
pub mod row_packer;

// Re-export the public API consumed by the worksheet assembler.
pub use block_builder::build_for_character;
pub use cells::PracticeBlock;
pub use page_planner::{plan, PagePlan};
