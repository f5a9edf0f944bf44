//! Metadata Source: pinyin, radical and structure for a character.
//!
//! Lookups are local and always succeed. The standard stack asks, in order: an optional
//! dictionary file, the computed pinyin readings, and the built-in surname table. Each
//! layer only fills the fields the layers above it left at `N/A`, one field at a time.
//! Characters outside the recognized range get `N/A` everywhere.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use pinyin::ToPinyinMulti;
use serde::Deserialize;
use tracing::{info, warn};

use crate::characters::models::{is_recognized, CharacterDetails, NOT_AVAILABLE};

pub trait MetadataSource: Send + Sync {
    /// Never fails; unknown fields carry the `N/A` sentinel.
    fn lookup(&self, character: char) -> CharacterDetails;
}

// ────────────────────────────────────────────────────────────────────────────
// Dictionary file
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
struct DictionaryEntry {
    pinyin: Option<Vec<String>>,
    radical: Option<String>,
    structure: Option<String>,
}

/// Character dictionary loaded from a JSON object keyed by single characters:
///
/// ```json
/// { "王": { "pinyin": ["wáng"], "radical": "王", "structure": "单一" } }
/// ```
#[derive(Debug, Default)]
pub struct DictionaryMetadataSource {
    entries: HashMap<char, DictionaryEntry>,
}

impl DictionaryMetadataSource {
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: HashMap<String, DictionaryEntry> =
            serde_json::from_str(text).context("character dictionary is not valid JSON")?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (key, entry) in raw {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    entries.insert(c, entry);
                }
                _ => warn!("Ignoring dictionary key {:?}: not a single character", key),
            }
        }
        Ok(Self { entries })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read character dictionary {}", path.display()))?;
        let source = Self::from_json(&text)?;
        if source.is_empty() {
            warn!("Character dictionary {} has no usable entries", path.display());
        }
        info!(
            "Loaded {} dictionary entries from {}",
            source.len(),
            path.display()
        );
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataSource for DictionaryMetadataSource {
    fn lookup(&self, character: char) -> CharacterDetails {
        let mut details = CharacterDetails::unknown(character);
        if let Some(entry) = self.entries.get(&character) {
            if let Some(pinyin) = entry.pinyin.as_ref().filter(|p| !p.is_empty()) {
                details.pinyin = pinyin.clone();
            }
            if let Some(radical) = entry.radical.as_ref().filter(|r| !r.is_empty()) {
                details.radical = radical.clone();
            }
            if let Some(structure) = entry.structure.as_ref().filter(|s| !s.is_empty()) {
                details.structure = structure.clone();
            }
        }
        details
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Computed readings
// ────────────────────────────────────────────────────────────────────────────

/// Tone-marked readings for any ideograph, heteronyms included, from the Unicode pinyin
/// data compiled into the `pinyin` crate. Radical and structure are left at `N/A`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PinyinMetadataSource;

impl MetadataSource for PinyinMetadataSource {
    fn lookup(&self, character: char) -> CharacterDetails {
        let mut details = CharacterDetails::unknown(character);
        if !is_recognized(character) {
            return details;
        }
        if let Some(readings) = character.to_pinyin_multi() {
            let pinyin: Vec<String> = readings
                .into_iter()
                .map(|reading| reading.with_tone().to_string())
                .collect();
            if !pinyin.is_empty() {
                details.pinyin = pinyin;
            }
        }
        details
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in fallback table
// ────────────────────────────────────────────────────────────────────────────

/// (character, pinyin, radical, structure) for common surnames and given-name characters.
const FALLBACK_TABLE: &[(char, &str, &str, &str)] = &[
    ('王', "wáng", "王", "单一"),
    ('小', "xiǎo", "小", "单一"),
    ('明', "míng", "日", "左右"),
    ('李', "lǐ", "木", "上下"),
    ('张', "zhāng", "弓", "左右"),
    ('刘', "liú", "刀", "左右"),
    ('陈', "chén", "阝", "左右"),
    ('杨', "yáng", "木", "左右"),
    ('黄', "huáng", "黄", "上中下"),
    ('赵', "zhào", "走", "半包围"),
    ('吴', "wú", "口", "上下"),
    ('周', "zhōu", "口", "全包围"),
    ('徐', "xú", "彳", "左右"),
    ('孙', "sūn", "子", "左右"),
    ('马', "mǎ", "马", "单一"),
    ('朱', "zhū", "木", "单一"),
    ('胡', "hú", "月", "左右"),
    ('林', "lín", "木", "左右"),
    ('郭', "guō", "阝", "左右"),
    ('何', "hé", "人", "左右"),
    ('高', "gāo", "高", "上下"),
    ('罗', "luó", "罒", "上下"),
    ('郑', "zhèng", "阝", "左右"),
    ('梁', "liáng", "木", "上下"),
    ('谢', "xiè", "言", "左右"),
    ('宋', "sòng", "宀", "上下"),
    ('唐', "táng", "口", "半包围"),
    ('许', "xǔ", "言", "左右"),
    ('邓', "dèng", "阝", "左右"),
    ('冯', "féng", "冫", "左右"),
    ('韩', "hán", "韦", "左右"),
    ('曹', "cáo", "曰", "上下"),
    ('曾', "céng", "曰", "上中下"),
    ('彭', "péng", "彡", "左右"),
    ('萧', "xiāo", "艹", "上下"),
    ('蔡', "cài", "艹", "上下"),
    ('潘', "pān", "氵", "左右"),
    ('田', "tián", "田", "单一"),
    ('董', "dǒng", "艹", "上下"),
    ('袁', "yuán", "衣", "上下"),
    ('于', "yú", "二", "单一"),
    ('余', "yú", "人", "上下"),
    ('叶', "yè", "口", "左右"),
    ('蒋', "jiǎng", "艹", "上下"),
    ('杜', "dù", "木", "左右"),
    ('苏', "sū", "艹", "上下"),
    ('魏', "wèi", "鬼", "左右"),
    ('程', "chéng", "禾", "左右"),
    ('吕', "lǚ", "口", "上下"),
    ('丁', "dīng", "一", "单一"),
    ('沈', "shěn", "氵", "左右"),
    ('任', "rèn", "人", "左右"),
    ('姚', "yáo", "女", "左右"),
    ('卢', "lú", "卜", "上下"),
    ('傅', "fù", "人", "左右"),
    ('钟', "zhōng", "钅", "左右"),
    ('姜', "jiāng", "女", "上下"),
    ('崔', "cuī", "山", "左右"),
    ('谭', "tán", "言", "左右"),
    ('廖', "liào", "广", "半包围"),
    ('范', "fàn", "艹", "上下"),
    ('汪', "wāng", "氵", "左右"),
    ('陆', "lù", "阝", "左右"),
];

#[derive(Debug, Default, Clone, Copy)]
pub struct FallbackMetadataSource;

impl MetadataSource for FallbackMetadataSource {
    fn lookup(&self, character: char) -> CharacterDetails {
        FALLBACK_TABLE
            .iter()
            .find(|(c, ..)| *c == character)
            .map(|(c, pinyin, radical, structure)| CharacterDetails {
                character: *c,
                pinyin: vec![pinyin.to_string()],
                radical: radical.to_string(),
                structure: structure.to_string(),
            })
            .unwrap_or_else(|| CharacterDetails::unknown(character))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layered source
// ────────────────────────────────────────────────────────────────────────────

pub struct LayeredMetadataSource {
    primary: Box<dyn MetadataSource>,
    fallback: Box<dyn MetadataSource>,
}

impl LayeredMetadataSource {
    pub fn new(primary: Box<dyn MetadataSource>, fallback: Box<dyn MetadataSource>) -> Self {
        Self { primary, fallback }
    }

    /// `dictionary`, then computed readings, then the built-in table.
    pub fn standard(dictionary: DictionaryMetadataSource) -> Self {
        Self::new(
            Box::new(dictionary),
            Box::new(Self::new(
                Box::new(PinyinMetadataSource),
                Box::new(FallbackMetadataSource),
            )),
        )
    }
}

impl MetadataSource for LayeredMetadataSource {
    fn lookup(&self, character: char) -> CharacterDetails {
        if !is_recognized(character) {
            return CharacterDetails::unknown(character);
        }

        let mut details = self.primary.lookup(character);
        let missing_pinyin = !details.has_pinyin();
        let missing_radical = details.radical == NOT_AVAILABLE;
        let missing_structure = details.structure == NOT_AVAILABLE;
        if !(missing_pinyin || missing_radical || missing_structure) {
            return details;
        }

        let fallback = self.fallback.lookup(character);
        if missing_pinyin {
            details.pinyin = fallback.pinyin;
        }
        if missing_radical {
            details.radical = fallback.radical;
        }
        if missing_structure {
            details.structure = fallback.structure;
        }
        details
    }
}
