//! # architect-service
//!
//! Generates a Dockerfile, Kubernetes manifests and a GitHub Actions pipeline
//! for a Node.js application from nine plain settings, and answers free-form
//! DevOps questions through a Gemini model.
//!
//! ## Features
//!
//! - **Manifests**: Dockerfile, Deployment, Service, Ingress, ConfigMap/Secret,
//!   HorizontalPodAutoscaler and a CI/CD workflow, all pure functions of [`AppConfig`]
//! - **Templates**: embedded Jinja templates that users can override on disk
//! - **Advice**: prompt building and a fallback answer when the model is unreachable
//! - **HTTP**: a server-rendered form page plus a JSON API
//! - **Graceful shutdown**: proper signal handling (SIGTERM, SIGINT)
//!
//! [`AppConfig`]: app_config::AppConfig
//!
//! ## Example
//!
//! ```rust,no_run
//! use architect_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let state = AppState::new(config.clone())?;
//!
//!     Server::new(config)
//!         .serve(router(state))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod advice;
pub mod app_config;
pub mod checklist;
pub mod config;
pub mod error;
pub mod handlers;
pub mod health;
pub mod manifests;
pub mod middleware;
pub mod observability;
pub mod server;
pub mod state;
pub mod template_engine;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::advice::{
        build_prompt, Advice, AdviceProvider, AdviceRequest, AdviceService, GeminiProvider,
        EMPTY_ANSWER, FALLBACK_ANSWER,
    };
    pub use crate::app_config::{AppConfig, ConfigField};
    pub use crate::checklist::CHECKLIST;
    pub use crate::config::{AdviceConfig, Config};
    pub use crate::error::{Error, ErrorResponse, Result};
    pub use crate::handlers::router;
    pub use crate::health::{health, readiness};
    pub use crate::manifests::{ManifestKind, ManifestRenderer, ManifestSet, RenderedManifest};
    pub use crate::middleware::{
        request_id_layer, request_id_propagation_layer, sensitive_headers_layer, SENSITIVE_HEADERS,
    };
    pub use crate::observability::{init_cli_tracing, init_tracing, shutdown_tracing};
    pub use crate::server::Server;
    pub use crate::state::AppState;
    pub use crate::template_engine::TemplateEngine;

    pub use axum::{
        extract::{Json, Path, Query, State},
        response::{IntoResponse, Response},
        routing::{get, post},
        Router,
    };

    pub use serde::{Deserialize, Serialize};
    pub use tokio;
    pub use tracing::{debug, error, info, trace, warn};
}
