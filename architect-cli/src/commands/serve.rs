use anyhow::{Context, Result};
use architect_service::prelude::*;
use std::path::PathBuf;

pub async fn execute(port: Option<u16>, config_path: Option<PathBuf>) -> Result<()> {
    let mut config = match config_path {
        Some(ref path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load configuration")?,
    };

    if let Some(port) = port {
        config.service.port = port;
    }

    init_tracing(&config)?;

    let state = AppState::new(config.clone())?;
    let result = Server::new(config).serve(router(state)).await;

    shutdown_tracing();
    Ok(result?)
}
