//! Worksheet Assembler: turns settings plus resolved character data into the page
//! structure a renderer draws.
//!
//! Layout only runs once every distinct character of the name has resolved data; until
//! then the view is `Loading`. The assembler never fetches anything itself.

use std::collections::HashMap;

use serde::Serialize;

use crate::characters::models::{distinct_characters, CharacterData, CharacterDetails, StrokeSet};
use crate::layout::{build_for_character, plan, PagePlan, PracticeBlock};
use crate::worksheet::settings::{ColorScheme, GridType, Settings};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorksheetView {
    /// The name has no characters after whitespace removal.
    Empty,
    /// Some characters have not been resolved yet.
    Loading { pending: Vec<char> },
    Ready(Worksheet),
}

#[derive(Debug, Clone, Serialize)]
pub struct Worksheet {
    pub title: String,
    pub can_fit_on_one_page: bool,
    pub character_count: usize,
    pub grid_type: GridType,
    pub grid_count: usize,
    pub show_pinyin: bool,
    pub colors: ColorScheme,
    pub pages: Vec<WorksheetPage>,
}

/// Vertical spacing between character sections on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSpacing {
    /// Several characters share the page; sections get separators and more air.
    Relaxed,
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageHeader {
    pub number: usize,
    pub total: usize,
    /// `全部/3字` on a single shared page, `2/3` otherwise.
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorksheetPage {
    pub header: PageHeader,
    pub spacing: SectionSpacing,
    pub sections: Vec<CharacterSection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CharacterSection {
    pub character: char,
    pub details: CharacterDetails,
    pub stroke_count: usize,
    pub strokes: StrokeSet,
    /// Reading printed above every practice cell; `None` when pinyin display is off.
    pub pinyin_line: Option<String>,
    pub rows: PracticeBlock,
}

// ────────────────────────────────────────────────────────────────────────────
// Assembly
// ────────────────────────────────────────────────────────────────────────────

/// Page plan for `characters` using the stroke counts in `data`.
pub fn plan_pages(
    characters: &[char],
    data: &HashMap<char, CharacterData>,
    settings: &Settings,
) -> PagePlan {
    let stroke_counts: HashMap<char, usize> = characters
        .iter()
        .filter_map(|c| data.get(c).map(|d| (*c, d.stroke_count())))
        .collect();
    plan(characters, &stroke_counts, settings.grid_width(), settings.tracing_rows)
}

pub fn assemble(
    settings: &Settings,
    title: &str,
    data: &HashMap<char, CharacterData>,
) -> WorksheetView {
    let characters = distinct_characters(&settings.name);
    if characters.is_empty() {
        return WorksheetView::Empty;
    }

    let pending: Vec<char> = characters
        .iter()
        .copied()
        .filter(|c| !data.contains_key(c))
        .collect();
    if !pending.is_empty() {
        return WorksheetView::Loading { pending };
    }

    let page_plan = plan_pages(&characters, data, settings);
    let total = page_plan.pages.len();
    let spacing = if page_plan.can_fit_on_one_page {
        SectionSpacing::Relaxed
    } else {
        SectionSpacing::Compact
    };

    let pages = page_plan
        .pages
        .iter()
        .enumerate()
        .map(|(index, page_chars)| WorksheetPage {
            header: page_header(index, total, page_plan.can_fit_on_one_page, characters.len()),
            spacing,
            sections: page_chars
                .iter()
                .filter_map(|c| data.get(c))
                .map(|d| character_section(d, settings))
                .collect(),
        })
        .collect();

    WorksheetView::Ready(Worksheet {
        title: title.to_string(),
        can_fit_on_one_page: page_plan.can_fit_on_one_page,
        character_count: characters.len(),
        grid_type: settings.grid_type,
        grid_count: settings.grid_width(),
        show_pinyin: settings.show_pinyin,
        colors: settings.colors.clone(),
        pages,
    })
}

fn page_header(
    index: usize,
    total: usize,
    shared_page: bool,
    character_count: usize,
) -> PageHeader {
    let label = if shared_page {
        format!("全部/{character_count}字")
    } else {
        format!("{}/{}", index + 1, total)
    };
    PageHeader {
        number: index + 1,
        total,
        label,
    }
}

fn character_section(data: &CharacterData, settings: &Settings) -> CharacterSection {
    let stroke_count = data.stroke_count();
    CharacterSection {
        character: data.details.character,
        details: data.details.clone(),
        stroke_count,
        strokes: data.strokes.clone(),
        pinyin_line: settings
            .show_pinyin
            .then(|| data.details.primary_pinyin().to_string()),
        rows: build_for_character(stroke_count, settings.grid_width(), settings.tracing_rows),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
