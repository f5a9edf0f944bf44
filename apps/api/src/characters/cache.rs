//! Session cache of resolved character data, keyed by character.
//!
//! Entries live until `clear` (full reset); there is no eviction. Readers get cloned
//! snapshots, so a worksheet is always assembled from one consistent view.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::characters::models::CharacterData;

#[derive(Debug, Default)]
pub struct CharacterCache {
    entries: RwLock<HashMap<char, CharacterData>>,
}

impl CharacterCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, character: char) -> Option<CharacterData> {
        self.entries.read().await.get(&character).cloned()
    }

    /// Keeps the first value stored for a character; later inserts for the same key are
    /// ignored. Returns whether the value was stored.
    pub async fn insert(&self, data: CharacterData) -> bool {
        let mut entries = self.entries.write().await;
        let key = data.details.character;
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, data);
        true
    }

    /// Characters from `characters` with no entry yet, in input order.
    pub async fn missing(&self, characters: &[char]) -> Vec<char> {
        let entries = self.entries.read().await;
        characters
            .iter()
            .copied()
            .filter(|c| !entries.contains_key(c))
            .collect()
    }

    /// Cloned entries for the requested characters that are present.
    pub async fn snapshot(&self, characters: &[char]) -> HashMap<char, CharacterData> {
        let entries = self.entries.read().await;
        characters
            .iter()
            .filter_map(|c| entries.get(c).map(|d| (*c, d.clone())))
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}
