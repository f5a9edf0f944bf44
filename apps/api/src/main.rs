mod characters;
mod config;
mod errors;
mod layout;
mod routes;
mod state;
mod worksheet;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::characters::{
    CachedStrokeSource, CdnStrokeSource, CharacterCache, DictionaryMetadataSource,
    LayeredMetadataSource, MetadataSource, StrokeSource,
};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Zitie API v{}", env!("CARGO_PKG_VERSION"));

    // Stroke data: CDN behind a time-bounded cache
    let cdn = CdnStrokeSource::new(
        config.stroke_data_base_url.clone(),
        Duration::from_secs(config.stroke_fetch_timeout_secs),
    )?;
    let strokes: Arc<dyn StrokeSource> = Arc::new(CachedStrokeSource::new(
        cdn,
        Duration::from_secs(config.stroke_cache_ttl_secs),
    ));
    info!(
        "Stroke source: {} (cache ttl {}s)",
        config.stroke_data_base_url, config.stroke_cache_ttl_secs
    );

    // Metadata: optional dictionary file over computed readings over the built-in table
    let dictionary = match &config.character_dict_path {
        Some(path) => DictionaryMetadataSource::from_path(path)?,
        None => {
            info!("No CHARACTER_DICT_PATH set; using computed readings and built-in table");
            DictionaryMetadataSource::default()
        }
    };
    let metadata: Arc<dyn MetadataSource> = Arc::new(LayeredMetadataSource::standard(dictionary));

    // Build app state
    let state = AppState {
        config: config.clone(),
        strokes,
        metadata,
        cache: Arc::new(CharacterCache::new()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
