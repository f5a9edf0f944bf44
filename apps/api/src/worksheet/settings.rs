//! Worksheet settings as sent by the client, with the defaults and bounds of the editor.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const MIN_GRID_COUNT: i64 = 4;
pub const MAX_GRID_COUNT: i64 = 16;
pub const MIN_TRACING_ROWS: i32 = 0;
pub const MAX_TRACING_ROWS: i32 = 12;

/// Guide lines drawn inside every cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridType {
    /// 田字格: horizontal and vertical centre lines.
    #[default]
    TianZiGe,
    /// 米字格: centre lines plus both diagonals.
    MiZiGe,
    /// 回宫格: centre lines plus an inner square.
    HuiGongGe,
}

/// The five renderer colors, as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    /// Cell borders and guide lines.
    pub grid: String,
    /// The example character next to the details.
    pub character: String,
    /// Filler cells and the faint base layer of trace cells.
    pub tracing: String,
    /// The stroke being demonstrated in a trace cell.
    pub stroke: String,
    /// Strokes already demonstrated in a trace cell.
    pub completed_stroke: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            grid: "#d1d5db".to_string(),
            character: "#000000".to_string(),
            tracing: "#d1d5db".to_string(),
            stroke: "#fca5a5".to_string(),
            completed_stroke: "#000000".to_string(),
        }
    }
}

impl ColorScheme {
    fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("grid", self.grid.as_str()),
            ("character", self.character.as_str()),
            ("tracing", self.tracing.as_str()),
            ("stroke", self.stroke.as_str()),
            ("completed_stroke", self.completed_stroke.as_str()),
        ]
    }

    pub fn validate(&self) -> Result<(), AppError> {
        for (field, value) in self.named() {
            if !is_hex_color(value) {
                return Err(AppError::Validation(format!(
                    "colors.{field} must be a #rgb or #rrggbb hex color, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub name: String,
    /// Cells per row.
    pub grid_count: i64,
    /// Tracing passes per character. Zero still prints one pass.
    pub tracing_rows: i32,
    pub grid_type: GridType,
    pub show_pinyin: bool,
    pub colors: ColorScheme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            name: "王小明".to_string(),
            grid_count: 8,
            tracing_rows: 2,
            grid_type: GridType::default(),
            show_pinyin: false,
            colors: ColorScheme::default(),
        }
    }
}

impl Settings {
    /// Clamps the numeric settings into the editor's ranges and checks the colors.
    pub fn normalized(mut self) -> Result<Self, AppError> {
        self.colors.validate()?;
        self.grid_count = self.grid_count.clamp(MIN_GRID_COUNT, MAX_GRID_COUNT);
        self.tracing_rows = self.tracing_rows.clamp(MIN_TRACING_ROWS, MAX_TRACING_ROWS);
        Ok(self)
    }

    /// Cells per row as used by the layout engine.
    pub fn grid_width(&self) -> usize {
        self.grid_count.clamp(MIN_GRID_COUNT, MAX_GRID_COUNT) as usize
    }
}

/// Query-string form of the settings used by the non-blocking preview endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewQuery {
    pub name: String,
    pub grid_count: Option<i64>,
    pub tracing_rows: Option<i32>,
    pub grid_type: Option<GridType>,
    pub show_pinyin: Option<bool>,
}

impl From<PreviewQuery> for Settings {
    fn from(query: PreviewQuery) -> Self {
        let defaults = Settings::default();
        Settings {
            name: query.name,
            grid_count: query.grid_count.unwrap_or(defaults.grid_count),
            tracing_rows: query.tracing_rows.unwrap_or(defaults.tracing_rows),
            grid_type: query.grid_type.unwrap_or(defaults.grid_type),
            show_pinyin: query.show_pinyin.unwrap_or(defaults.show_pinyin),
            colors: defaults.colors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_body() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.grid_width(), 8);
    }

    #[test]
    fn test_grid_type_wire_names() {
        let parsed: GridType = serde_json::from_str("\"hui-gong-ge\"").unwrap();
        assert_eq!(parsed, GridType::HuiGongGe);
        assert_eq!(serde_json::to_string(&GridType::MiZiGe).unwrap(), "\"mi-zi-ge\"");
    }

    #[test]
    fn test_normalized_clamps_ranges() {
        let settings = Settings {
            grid_count: 40,
            tracing_rows: -3,
            ..Settings::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(settings.grid_count, 16);
        assert_eq!(settings.tracing_rows, 0);

        let settings = Settings {
            grid_count: 1,
            tracing_rows: 99,
            ..Settings::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(settings.grid_count, 4);
        assert_eq!(settings.tracing_rows, 12);
    }

    #[test]
    fn test_bad_color_rejected() {
        let mut settings = Settings::default();
        settings.colors.stroke = "red".to_string();
        assert!(matches!(settings.normalized(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_short_hex_color_accepted() {
        let mut settings = Settings::default();
        settings.colors.grid = "#abc".to_string();
        assert!(settings.normalized().is_ok());
    }

    #[test]
    fn test_partial_colors_keep_other_defaults() {
        let settings: Settings =
            serde_json::from_str(r##"{ "colors": { "stroke": "#ff0000" } }"##).unwrap();
        assert_eq!(settings.colors.stroke, "#ff0000");
        assert_eq!(settings.colors.grid, "#d1d5db");
    }
}
