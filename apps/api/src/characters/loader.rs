//! Character Loader: resolves every not-yet-cached character of a name.
//!
//! One task per new character (fan-out), all results stored before returning (fan-in).
//! Characters already in the cache are skipped, so repeating a request is cheap. A task
//! that dies still yields an entry for its character: looked-up metadata, no strokes.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::characters::cache::CharacterCache;
use crate::characters::metadata::MetadataSource;
use crate::characters::models::{CharacterData, StrokeSet};
use crate::characters::stroke_source::{resolve_strokes, StrokeSource};

/// Strokes and metadata for one character. Never fails.
pub async fn resolve_character(
    character: char,
    strokes: &dyn StrokeSource,
    metadata: &dyn MetadataSource,
) -> CharacterData {
    let details = metadata.lookup(character);
    let strokes = resolve_strokes(strokes, character).await;
    if strokes.is_empty() {
        debug!("'{}' resolved without strokes; it will render as filler", character);
    }
    CharacterData {
        details,
        strokes,
        resolved_at: Utc::now(),
    }
}

/// Resolves the characters from `characters` missing in `cache` and stores them.
/// Returns the number of characters that were resolved by this call.
pub async fn load_characters(
    characters: &[char],
    cache: &CharacterCache,
    strokes: Arc<dyn StrokeSource>,
    metadata: Arc<dyn MetadataSource>,
) -> usize {
    let pending = cache.missing(characters).await;
    if pending.is_empty() {
        debug!("All {} characters already cached", characters.len());
        return 0;
    }
    info!("Resolving {} new characters", pending.len());

    let mut tasks = JoinSet::new();
    for &character in &pending {
        let strokes = Arc::clone(&strokes);
        let metadata = Arc::clone(&metadata);
        tasks.spawn(async move {
            resolve_character(character, strokes.as_ref(), metadata.as_ref()).await
        });
    }

    let mut resolved: HashSet<char> = HashSet::with_capacity(pending.len());
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(data) => {
                resolved.insert(data.details.character);
                cache.insert(data).await;
            }
            Err(e) => warn!("Character resolution task failed: {e}"),
        }
    }

    for &character in pending.iter().filter(|c| !resolved.contains(c)) {
        cache
            .insert(CharacterData {
                details: metadata.lookup(character),
                strokes: StrokeSet::empty(),
                resolved_at: Utc::now(),
            })
            .await;
    }

    pending.len()
}
