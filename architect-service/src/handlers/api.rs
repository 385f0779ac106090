//! JSON API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    advice::{Advice, AdviceRequest},
    app_config::AppConfig,
    checklist::CHECKLIST,
    error::Result,
    manifests::{ManifestKind, ManifestSet, RenderedManifest},
    state::AppState,
};

/// Checklist response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub items: Vec<String>,
}

/// `GET /api/config/defaults`
pub async fn default_config(State(state): State<AppState>) -> Json<AppConfig> {
    Json(state.config().defaults.clone())
}

/// `POST /api/manifests`
pub async fn render_manifests(
    State(state): State<AppState>,
    Json(config): Json<AppConfig>,
) -> Result<Json<ManifestSet>> {
    Ok(Json(state.renderer().render_all(&config)?))
}

/// `POST /api/manifests/{kind}`
pub async fn render_manifest(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(config): Json<AppConfig>,
) -> Result<Json<RenderedManifest>> {
    let kind: ManifestKind = kind.parse()?;
    Ok(Json(state.renderer().render_manifest(kind, &config)?))
}

/// `POST /api/advice`
pub async fn ask_advice(
    State(state): State<AppState>,
    Json(request): Json<AdviceRequest>,
) -> Result<Json<Advice>> {
    let config = request
        .config
        .unwrap_or_else(|| state.config().defaults.clone());

    let advice = state.advisor().ask(&request.question, &config).await?;
    tracing::info!(
        app = %config.app_name,
        fallback = advice.fallback,
        "Answered advice request"
    );

    Ok(Json(advice))
}

/// `GET /api/checklist`
pub async fn checklist() -> Json<ChecklistResponse> {
    Json(ChecklistResponse {
        items: CHECKLIST.iter().map(|s| s.to_string()).collect(),
    })
}
