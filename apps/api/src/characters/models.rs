use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel used for every metadata field that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

/// True for characters in the CJK Unified Ideographs block covered by the stroke
/// dataset (U+4E00..=U+9FA5). Anything else gets sentinel metadata and no strokes.
pub fn is_recognized(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Distinct characters of a name: whitespace removed, duplicates dropped, order of first
/// appearance kept.
pub fn distinct_characters(name: &str) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();
    for c in name.chars().filter(|c| !c.is_whitespace()) {
        if !out.contains(&c) {
            out.push(c);
        }
    }
    out
}

/// Ordered stroke outlines for one character, as served by hanzi-writer-data.
///
/// `strokes[i]` is an SVG path in a 1024×1024 box with a flipped y-axis;
/// `medians[i]` is the centre line of the same stroke. An empty set means "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeSet {
    #[serde(default)]
    pub strokes: Vec<String>,
    #[serde(default)]
    pub medians: Vec<Vec<[f64; 2]>>,
}

impl StrokeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Pronunciation and composition info shown next to the example cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDetails {
    pub character: char,
    pub pinyin: Vec<String>,
    pub radical: String,
    /// Layout of the components, e.g. 左右, 上下, 单一.
    pub structure: String,
}

impl CharacterDetails {
    pub fn unknown(character: char) -> Self {
        Self {
            character,
            pinyin: vec![NOT_AVAILABLE.to_string()],
            radical: NOT_AVAILABLE.to_string(),
            structure: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn has_pinyin(&self) -> bool {
        self.pinyin.first().is_some_and(|p| p != NOT_AVAILABLE)
    }

    /// First reading, used for the pinyin line above each practice cell.
    pub fn primary_pinyin(&self) -> &str {
        self.pinyin.first().map(String::as_str).unwrap_or(NOT_AVAILABLE)
    }
}

/// Everything resolved for one character during a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterData {
    pub details: CharacterDetails,
    pub strokes: StrokeSet,
    pub resolved_at: DateTime<Utc>,
}

impl CharacterData {
    pub fn stroke_count(&self) -> usize {
        self.strokes.stroke_count()
    }
}
