//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Simple health check for liveness
///
/// Always returns 200 OK if the service is running.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check
///
/// Returns 503 when the manifest templates cannot be rendered, for example
/// after a broken user override. A missing advice API key is reported but
/// does not block readiness, since advice degrades to the fallback answer.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let mut dependencies = HashMap::new();

    let templates_ready = match state.renderer().render_all(&state.config().defaults) {
        Ok(set) => {
            dependencies.insert(
                "templates".to_string(),
                DependencyStatus {
                    healthy: true,
                    message: Some(format!("{} manifests renderable", set.manifests.len())),
                },
            );
            true
        }
        Err(e) => {
            tracing::error!("Template readiness check failed: {}", e);
            dependencies.insert(
                "templates".to_string(),
                DependencyStatus {
                    healthy: false,
                    message: Some(e.to_string()),
                },
            );
            false
        }
    };

    let has_key = state.config().advice.api_key().is_some();
    dependencies.insert(
        "advice".to_string(),
        DependencyStatus {
            healthy: has_key,
            message: Some(if has_key {
                "API key configured".to_string()
            } else {
                "No API key; fallback answers only".to_string()
            }),
        },
    );

    let response = ReadinessResponse {
        ready: templates_ready,
        service: state.config().service.name.clone(),
        dependencies,
    };

    let status = if templates_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.templates.dir = Some(dir.path().to_path_buf());

        let state = AppState::new(config).unwrap();
        let response = health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_ok_with_embedded_templates() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.templates.dir = Some(dir.path().to_path_buf());

        let state = AppState::new(config).unwrap();
        let response = readiness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_fails_on_broken_override() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("manifests")).unwrap();
        fs::write(dir.path().join("manifests/hpa.yaml.jinja"), "{% if %}").unwrap();

        let mut config = Config::default();
        config.templates.dir = Some(dir.path().to_path_buf());

        let state = AppState::new(config).unwrap();
        let response = readiness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_dependency_status() {
        let status = DependencyStatus {
            healthy: true,
            message: Some("OK".to_string()),
        };

        assert!(status.healthy);
        assert_eq!(status.message, Some("OK".to_string()));
    }
}
