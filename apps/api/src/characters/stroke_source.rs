//! Stroke Source: per-character stroke outlines from the hanzi-writer-data CDN.
//!
//! Missing data is a normal outcome here: unknown characters, 404s, timeouts and
//! malformed payloads all end up as an empty `StrokeSet` at `resolve_strokes`, which is
//! the only function the rest of the service calls. Failures are logged, never raised.
//! There are no retries; a failed character simply renders as filler cells.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::characters::models::{is_recognized, StrokeSet};

pub const DEFAULT_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/hanzi-writer-data@2.0";

#[derive(Debug, Error)]
pub enum StrokeSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No stroke data for '{0}'")]
    NotFound(char),

    #[error("Stroke source returned status {status} for '{character}'")]
    Api { status: u16, character: char },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Anything that can produce stroke outlines for a character.
///
/// Carried in `AppState` as `Arc<dyn StrokeSource>` so tests can swap in fakes.
#[async_trait]
pub trait StrokeSource: Send + Sync {
    async fn fetch(&self, character: char) -> Result<StrokeSet, StrokeSourceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// CdnStrokeSource
// ────────────────────────────────────────────────────────────────────────────

/// Fetches `{base_url}/{character}.json` over HTTP.
#[derive(Clone)]
pub struct CdnStrokeSource {
    client: Client,
    base_url: String,
}

impl CdnStrokeSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, StrokeSourceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url_for(&self, character: char) -> String {
        format!("{}/{}.json", self.base_url.trim_end_matches('/'), character)
    }
}

#[async_trait]
impl StrokeSource for CdnStrokeSource {
    async fn fetch(&self, character: char) -> Result<StrokeSet, StrokeSourceError> {
        let url = self.url_for(character);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Err(StrokeSourceError::NotFound(character));
        }
        if !status.is_success() {
            return Err(StrokeSourceError::Api {
                status: status.as_u16(),
                character,
            });
        }

        let body = response.text().await?;
        let strokes: StrokeSet = serde_json::from_str(&body)?;
        debug!(
            "Fetched {} strokes for '{}' from {}",
            strokes.stroke_count(),
            character,
            url
        );
        Ok(strokes)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// CachedStrokeSource
// ────────────────────────────────────────────────────────────────────────────

/// Keeps successful fetches for `ttl`. Failures are not cached, so a later request for
/// the same character tries again.
pub struct CachedStrokeSource<S> {
    inner: S,
    ttl: chrono::Duration,
    entries: RwLock<HashMap<char, (DateTime<Utc>, StrokeSet)>>,
}

impl<S: StrokeSource> CachedStrokeSource<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            ttl: chrono::Duration::from_std(ttl)
                .unwrap_or_else(|_| chrono::Duration::weeks(52 * 100)),
            entries: RwLock::new(HashMap::new()),
        }
    }

    async fn fresh(&self, character: char) -> Option<StrokeSet> {
        let entries = self.entries.read().await;
        let (stored_at, strokes) = entries.get(&character)?;
        (Utc::now() - *stored_at < self.ttl).then(|| strokes.clone())
    }
}

#[async_trait]
impl<S: StrokeSource> StrokeSource for CachedStrokeSource<S> {
    async fn fetch(&self, character: char) -> Result<StrokeSet, StrokeSourceError> {
        if let Some(strokes) = self.fresh(character).await {
            return Ok(strokes);
        }
        let strokes = self.inner.fetch(character).await?;
        self.entries
            .write()
            .await
            .insert(character, (Utc::now(), strokes.clone()));
        Ok(strokes)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resolution boundary
// ────────────────────────────────────────────────────────────────────────────

/// Returns the strokes for `character`, or an empty set if there are none to be had.
pub async fn resolve_strokes(source: &dyn StrokeSource, character: char) -> StrokeSet {
    if !is_recognized(character) {
        debug!("Skipping stroke lookup for unrecognized character {:?}", character);
        return StrokeSet::empty();
    }
    match source.fetch(character).await {
        Ok(strokes) => strokes,
        Err(e) => {
            warn!("No stroke data for '{}': {}", character, e);
            StrokeSet::empty()
        }
    }
}
