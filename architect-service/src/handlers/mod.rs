//! HTTP routes

pub mod api;
pub mod page;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    health::{health, readiness},
    state::AppState,
};

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/api/config/defaults", get(api::default_config))
        .route("/api/manifests", post(api::render_manifests))
        .route("/api/manifests/{kind}", post(api::render_manifest))
        .route("/api/advice", post(api::ask_advice))
        .route("/api/checklist", get(api::checklist))
        .route("/health", get(health))
        .route("/ready", get(readiness))
        .with_state(state)
}
