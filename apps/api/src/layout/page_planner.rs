//! Page Layout Planner: decides whether a whole name fits on one printed page.
//!
//! The decision is a fixed empirical table, not a measured fit. Each rule gives, for a
//! number of distinct characters, the largest tracing-row count that still fits on one
//! A4 page, once for names made only of simple characters and once for names with at
//! least one complex character (more strokes than cells per row).
//!
//! | characters | max rows (simple) | max rows (complex) |
//! |-----------:|------------------:|-------------------:|
//! | 1          | 8                 | 6                  |
//! | 2          | 4                 | 3                  |
//! | 3          | 2                 | 1                  |
//!
//! Names with zero or four-plus characters never fit on a single page.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layout::block_builder::effective_rows;
use crate::layout::row_packer::is_complex;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// One row of the single-page eligibility table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnePageRule {
    pub character_count: usize,
    pub max_rows_simple: usize,
    pub max_rows_complex: usize,
}

impl OnePageRule {
    pub fn max_rows(&self, has_complex_character: bool) -> usize {
        if has_complex_character {
            self.max_rows_complex
        } else {
            self.max_rows_simple
        }
    }
}

/// Tuned by hand against printed output. Keep these values as they are.
pub const ONE_PAGE_RULES: [OnePageRule; 3] = [
    OnePageRule {
        character_count: 1,
        max_rows_simple: 8,
        max_rows_complex: 6,
    },
    OnePageRule {
        character_count: 2,
        max_rows_simple: 4,
        max_rows_complex: 3,
    },
    OnePageRule {
        character_count: 3,
        max_rows_simple: 2,
        max_rows_complex: 1,
    },
];

/// Page assignment for the distinct characters of a name.
///
/// The concatenation of all pages is the input character list, each exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePlan {
    pub can_fit_on_one_page: bool,
    pub pages: Vec<Vec<char>>,
}

impl PagePlan {
    pub fn empty() -> Self {
        Self {
            can_fit_on_one_page: false,
            pages: Vec::new(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core functions
// ────────────────────────────────────────────────────────────────────────────

/// Looks up the largest tracing-row count that still fits on one page.
/// `None` means the name never fits on one page.
pub fn max_one_page_rows(character_count: usize, has_complex_character: bool) -> Option<usize> {
    ONE_PAGE_RULES
        .iter()
        .find(|rule| rule.character_count == character_count)
        .map(|rule| rule.max_rows(has_complex_character))
}

/// Plans the pages for `characters` (distinct, in order of first appearance).
///
/// Characters missing from `stroke_counts` are treated as having no strokes.
pub fn plan(
    characters: &[char],
    stroke_counts: &HashMap<char, usize>,
    grid_width: usize,
    tracing_rows: i32,
) -> PagePlan {
    if characters.is_empty() {
        return PagePlan::empty();
    }

    let rows = effective_rows(tracing_rows);
    let has_complex_character = characters.iter().any(|c| {
        let strokes = stroke_counts.get(c).copied().unwrap_or(0);
        is_complex(strokes, grid_width)
    });

    let fits = max_one_page_rows(characters.len(), has_complex_character)
        .is_some_and(|max_rows| rows <= max_rows);

    if fits {
        PagePlan {
            can_fit_on_one_page: true,
            pages: vec![characters.to_vec()],
        }
    } else {
        PagePlan {
            can_fit_on_one_page: false,
            pages: characters.iter().map(|c| vec![*c]).collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(char, usize)]) -> HashMap<char, usize> {
        pairs.iter().copied().collect()
    }

    fn one_per_page(chars: &[char]) -> Vec<Vec<char>> {
        chars.iter().map(|c| vec![*c]).collect()
    }

    // ── rule table ──────────────────────────────────────────────────────────

    #[test]
    fn test_rule_table_lookup() {
        assert_eq!(max_one_page_rows(1, false), Some(8));
        assert_eq!(max_one_page_rows(1, true), Some(6));
        assert_eq!(max_one_page_rows(2, false), Some(4));
        assert_eq!(max_one_page_rows(2, true), Some(3));
        assert_eq!(max_one_page_rows(3, false), Some(2));
        assert_eq!(max_one_page_rows(3, true), Some(1));
        assert_eq!(max_one_page_rows(0, false), None);
        assert_eq!(max_one_page_rows(4, false), None);
        assert_eq!(max_one_page_rows(12, true), None);
    }

    // ── plan scenarios ──────────────────────────────────────────────────────

    #[test]
    fn test_single_complex_character_over_threshold_paginates() {
        let plan = plan(&['赢'], &counts(&[('赢', 20)]), 8, 8);
        assert!(!plan.can_fit_on_one_page);
        assert_eq!(plan.pages, vec![vec!['赢']]);
    }

    #[test]
    fn test_single_simple_character_up_to_eight_rows() {
        let c = counts(&[('王', 4)]);
        assert!(plan(&['王'], &c, 8, 8).can_fit_on_one_page);
        assert!(!plan(&['王'], &c, 8, 9).can_fit_on_one_page);
    }

    #[test]
    fn test_three_simple_characters_two_rows_share_a_page() {
        let chars = ['王', '小', '明'];
        let plan = plan(&chars, &counts(&[('王', 4), ('小', 3), ('明', 8)]), 8, 2);
        assert!(plan.can_fit_on_one_page);
        assert_eq!(plan.pages, vec![chars.to_vec()]);
    }

    #[test]
    fn test_three_characters_with_complex_one_paginates() {
        let chars = ['王', '小', '赢'];
        let plan = plan(&chars, &counts(&[('王', 4), ('小', 3), ('赢', 17)]), 8, 2);
        assert!(!plan.can_fit_on_one_page);
        assert_eq!(plan.pages, one_per_page(&chars));
    }

    #[test]
    fn test_three_characters_with_complex_one_fit_at_one_row() {
        let chars = ['王', '小', '赢'];
        let plan = plan(&chars, &counts(&[('王', 4), ('小', 3), ('赢', 17)]), 8, 1);
        assert!(plan.can_fit_on_one_page);
    }

    #[test]
    fn test_two_characters_complex_threshold() {
        let chars = ['欧', '阳'];
        let c = counts(&[('欧', 8), ('阳', 6)]);
        assert!(plan(&chars, &c, 4, 3).can_fit_on_one_page);
        assert!(!plan(&chars, &c, 4, 4).can_fit_on_one_page);
        assert!(plan(&chars, &c, 8, 4).can_fit_on_one_page);
    }

    // ── threshold edges ─────────────────────────────────────────────────────

    #[test]
    fn test_two_simple_characters_fit_up_to_four_rows() {
        let chars = ['李', '明'];
        let c = counts(&[('李', 7), ('明', 8)]);
        assert!(plan(&chars, &c, 8, 4).can_fit_on_one_page);
        let over = plan(&chars, &c, 8, 5);
        assert!(!over.can_fit_on_one_page);
        assert_eq!(over.pages, one_per_page(&chars));
    }

    #[test]
    fn test_three_simple_characters_fit_up_to_two_rows() {
        let chars = ['王', '小', '明'];
        let c = counts(&[('王', 4), ('小', 3), ('明', 8)]);
        assert!(plan(&chars, &c, 8, 2).can_fit_on_one_page);
        let over = plan(&chars, &c, 8, 3);
        assert!(!over.can_fit_on_one_page);
        assert_eq!(over.pages, one_per_page(&chars));
    }

    #[test]
    fn test_single_complex_character_fits_up_to_six_rows() {
        let c = counts(&[('赢', 17)]);
        assert!(plan(&['赢'], &c, 8, 6).can_fit_on_one_page);
        assert!(!plan(&['赢'], &c, 8, 7).can_fit_on_one_page);
    }

    #[test]
    fn test_stroke_count_equal_to_width_is_not_complex() {
        let chars = ['王', '明'];
        let c = counts(&[('王', 4), ('明', 8)]);
        assert!(plan(&chars, &c, 8, 4).can_fit_on_one_page);
        assert!(!plan(&chars, &c, 7, 4).can_fit_on_one_page);
    }

    #[test]
    fn test_five_characters_always_paginate() {
        let chars = ['爱', '新', '觉', '罗', '氏'];
        let c = counts(&[('爱', 1), ('新', 1), ('觉', 1), ('罗', 1), ('氏', 1)]);
        for tracing_rows in -1..=12 {
            let plan = plan(&chars, &c, 16, tracing_rows);
            assert!(!plan.can_fit_on_one_page);
            assert_eq!(plan.pages, one_per_page(&chars));
        }
    }

    #[test]
    fn test_no_characters_no_pages() {
        let plan = plan(&[], &HashMap::new(), 8, 2);
        assert_eq!(plan, PagePlan::empty());
    }

    #[test]
    fn test_zero_tracing_rows_counts_as_one() {
        let chars = ['王', '小', '赢'];
        let c = counts(&[('赢', 17)]);
        assert!(plan(&chars, &c, 8, 0).can_fit_on_one_page);
        assert!(plan(&chars, &c, 8, -4).can_fit_on_one_page);
    }

    #[test]
    fn test_missing_stroke_counts_are_not_complex() {
        let plan = plan(&['王', '?'], &counts(&[('王', 4)]), 4, 4);
        assert!(plan.can_fit_on_one_page);
    }

    #[test]
    fn test_plan_is_idempotent() {
        let chars = ['王', '小', '明'];
        let c = counts(&[('王', 4), ('小', 3), ('明', 8)]);
        assert_eq!(plan(&chars, &c, 6, 2), plan(&chars, &c, 6, 2));
    }

    #[test]
    fn test_pages_cover_every_character_once() {
        let chars = ['王', '小', '明', '李'];
        let plan = plan(&chars, &HashMap::new(), 8, 1);
        let flattened: Vec<char> = plan.pages.concat();
        assert_eq!(flattened, chars.to_vec());
    }
}
