use std::sync::Arc;

use crate::characters::{CharacterCache, MetadataSource, StrokeSource};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable stroke source. Default: CDN fetch behind a time-bounded cache.
    pub strokes: Arc<dyn StrokeSource>,
    /// Pluggable metadata source. Default: dictionary file layered over the built-in table.
    pub metadata: Arc<dyn MetadataSource>,
    /// Session cache of resolved characters; cleared by `DELETE /api/v1/session`.
    pub cache: Arc<CharacterCache>,
}
