use anyhow::{Context, Result};
use architect_service::{app_config::AppConfig, config::Config, template_engine::TemplateEngine};
use figment::{
    providers::{Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub mod ask;
pub mod checklist;
pub mod completions;
pub mod render;
pub mod serve;
pub mod templates;

/// Build the app record: configured defaults, then an optional file, then `--set` pairs
pub fn resolve_app_config(
    defaults: &AppConfig,
    file: Option<&Path>,
    sets: &[String],
) -> Result<AppConfig> {
    let mut app = match file {
        Some(path) => load_app_config(defaults, path)?,
        None => defaults.clone(),
    };

    for assignment in sets {
        app.apply_assignment(assignment)
            .with_context(|| format!("Invalid --set '{}'", assignment))?;
    }

    Ok(app)
}

/// Read an app record from JSON or TOML, filling gaps from `base`
fn load_app_config(base: &AppConfig, path: &Path) -> Result<AppConfig> {
    if !path.is_file() {
        anyhow::bail!("App config file not found: {}", path.display());
    }

    let figment = Figment::from(Serialized::defaults(base));
    let figment = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => figment.merge(Toml::file(path)),
        _ => figment.merge(Json::file(path)),
    };

    figment
        .extract()
        .with_context(|| format!("Failed to read app config: {}", path.display()))
}

/// Template engine honouring `templates.dir`
pub fn template_engine(config: &Config) -> TemplateEngine {
    match config.templates.dir {
        Some(ref dir) => TemplateEngine::with_dir(dir),
        None => TemplateEngine::new(),
    }
}
