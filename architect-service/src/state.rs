//! Application state management

use std::sync::Arc;

use crate::{
    advice::AdviceService,
    config::Config,
    error::Result,
    manifests::ManifestRenderer,
    template_engine::TemplateEngine,
};

/// Application state shared across handlers
///
/// The service keeps no per-user data; every request carries the full
/// application record it wants rendered.
#[derive(Clone, Debug)]
pub struct AppState {
    config: Arc<Config>,
    renderer: ManifestRenderer,
    advisor: AdviceService,
}

impl AppState {
    /// Create state from configuration
    ///
    /// Templates are read from `templates.dir` when set, otherwise from the
    /// XDG config directory, falling back to the embedded copies.
    pub fn new(config: Config) -> Result<Self> {
        let engine = match config.templates.dir {
            Some(ref dir) => TemplateEngine::with_dir(dir),
            None => TemplateEngine::new(),
        };
        let advisor = AdviceService::from_config(&config.advice)?;

        if config.advice.api_key().is_none() {
            tracing::warn!("No advice API key configured; advice requests will return the fallback answer");
        }

        Ok(Self::from_parts(config, ManifestRenderer::new(engine), advisor))
    }

    /// Assemble state from already-built components
    pub fn from_parts(config: Config, renderer: ManifestRenderer, advisor: AdviceService) -> Self {
        Self {
            config: Arc::new(config),
            renderer,
            advisor,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the manifest renderer
    pub fn renderer(&self) -> &ManifestRenderer {
        &self.renderer
    }

    /// Get the advice service
    pub fn advisor(&self) -> &AdviceService {
        &self.advisor
    }
}
