//! Axum route handlers for the Worksheet API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{debug, info};

use crate::characters::loader::{load_characters, resolve_character};
use crate::characters::models::{distinct_characters, CharacterData};
use crate::errors::AppError;
use crate::state::AppState;
use crate::worksheet::assembler::{assemble, WorksheetView};
use crate::worksheet::settings::{PreviewQuery, Settings};

/// GET /api/v1/characters/:character
///
/// Strokes and metadata for a single character, served from the session cache when
/// already resolved.
pub async fn handle_get_character(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<CharacterData>, AppError> {
    let mut chars = raw.chars();
    let character = match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => c,
        _ => {
            return Err(AppError::Validation(format!(
                "expected exactly one character, got {raw:?}"
            )))
        }
    };

    if let Some(data) = state.cache.get(character).await {
        return Ok(Json(data));
    }

    let data = resolve_character(character, state.strokes.as_ref(), state.metadata.as_ref()).await;
    state.cache.insert(data.clone()).await;
    Ok(Json(data))
}

/// POST /api/v1/worksheet
///
/// Resolves every distinct character of the name, then returns the laid-out worksheet.
pub async fn handle_build_worksheet(
    State(state): State<AppState>,
    Json(settings): Json<Settings>,
) -> Result<Json<WorksheetView>, AppError> {
    let settings = settings.normalized()?;
    let characters = distinct_characters(&settings.name);

    let fetched = load_characters(
        &characters,
        &state.cache,
        Arc::clone(&state.strokes),
        Arc::clone(&state.metadata),
    )
    .await;
    info!(
        "Building worksheet: {} characters ({} newly resolved), grid={}, rows={}",
        characters.len(),
        fetched,
        settings.grid_count,
        settings.tracing_rows
    );

    // Layout is pure CPU work over owned data; keep it off the async workers.
    let data = state.cache.snapshot(&characters).await;
    let title = state.config.worksheet_title.clone();
    let view = tokio::task::spawn_blocking(move || assemble(&settings, &title, &data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("worksheet assembly failed: {e}")))?;

    Ok(Json(view))
}

/// GET /api/v1/worksheet/preview
///
/// Returns whatever can be laid out right now. Characters not yet resolved are
/// fetched in the background and the view reports them as pending.
pub async fn handle_preview_worksheet(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<WorksheetView>, AppError> {
    let settings = Settings::from(query).normalized()?;
    let characters = distinct_characters(&settings.name);
    let data = state.cache.snapshot(&characters).await;
    let view = assemble(&settings, &state.config.worksheet_title, &data);

    if let WorksheetView::Loading { pending } = &view {
        debug!("Preview pending on {} characters; loading in background", pending.len());
        let pending = pending.clone();
        let state = state.clone();
        tokio::spawn(async move {
            load_characters(&pending, &state.cache, state.strokes, state.metadata).await;
        });
    }

    Ok(Json(view))
}

/// DELETE /api/v1/session
///
/// Drops every resolved character. The next request starts from scratch.
pub async fn handle_reset_session(State(state): State<AppState>) -> StatusCode {
    let cleared = state.cache.len().await;
    state.cache.clear().await;
    info!("Session reset: {cleared} cached characters dropped");
    StatusCode::NO_CONTENT
}
