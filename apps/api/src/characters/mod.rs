// Per-character data: stroke outlines (remote), metadata (local), the session cache,
// and the loader that fans requests out across the distinct characters of a name.
// All network access for strokes goes through stroke_source; nothing else calls the CDN.

pub mod cache;
pub mod loader;
pub mod metadata;
pub mod models;
pub mod stroke_source;

pub use cache::CharacterCache;
pub use metadata::{DictionaryMetadataSource, LayeredMetadataSource, MetadataSource};
pub use stroke_source::{CachedStrokeSource, CdnStrokeSource, StrokeSource};

#[cfg(test)]
pub mod testing {
    //! In-memory sources shared by the async tests.

    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::metadata::{FallbackMetadataSource, MetadataSource};
    use super::models::{CharacterData, StrokeSet};
    use super::stroke_source::{StrokeSource, StrokeSourceError};

    pub fn stroke_set(count: usize) -> StrokeSet {
        StrokeSet {
            strokes: (0..count).map(|i| format!("M {i} 0 L {i} 10 Z")).collect(),
            medians: (0..count).map(|i| vec![[i as f64, 0.0], [i as f64, 10.0]]).collect(),
        }
    }

    pub fn character_data(character: char, strokes: usize) -> CharacterData {
        CharacterData {
            details: FallbackMetadataSource.lookup(character),
            strokes: stroke_set(strokes),
            resolved_at: Utc::now(),
        }
    }

    /// Serves fixed stroke sets; unknown characters are `NotFound`, `failing` ones are
    /// HTTP-like errors and `panicking` ones bring down the task that asked. Counts every
    /// call.
    #[derive(Default)]
    pub struct FakeStrokeSource {
        data: HashMap<char, StrokeSet>,
        failing: HashSet<char>,
        panicking: HashSet<char>,
        calls: AtomicUsize,
    }

    impl FakeStrokeSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, character: char, strokes: StrokeSet) -> Self {
            self.data.insert(character, strokes);
            self
        }

        pub fn failing(mut self, character: char) -> Self {
            self.failing.insert(character);
            self
        }

        pub fn panicking(mut self, character: char) -> Self {
            self.panicking.insert(character);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl StrokeSource for FakeStrokeSource {
        async fn fetch(&self, character: char) -> Result<StrokeSet, StrokeSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.panicking.contains(&character) {
                panic!("stroke source blew up on '{character}'");
            }
            if self.failing.contains(&character) {
                return Err(StrokeSourceError::Api {
                    status: 503,
                    character,
                });
            }
            self.data
                .get(&character)
                .cloned()
                .ok_or(StrokeSourceError::NotFound(character))
        }
    }
}
