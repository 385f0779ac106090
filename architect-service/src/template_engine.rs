//! Embedded Jinja templates with user overrides
//!
//! All templates ship inside the binary. A file with the same relative path in
//! the user template directory takes precedence over the embedded copy, which
//! lets teams adjust the generated manifests without rebuilding.

use minijinja::{AutoEscape, Environment};
use rust_embed::Embed;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Embed all templates at compile time
#[derive(Embed)]
#[folder = "templates/"]
#[prefix = ""]
struct EmbeddedTemplates;

/// Template engine with support for embedded templates and user customization
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    config_dir: Option<PathBuf>,
}

impl TemplateEngine {
    /// Create a template engine that reads overrides from the XDG config directory
    pub fn new() -> Self {
        Self {
            config_dir: Self::default_config_dir(),
        }
    }

    /// Create a template engine with overrides from a specific directory
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(dir.into()),
        }
    }

    /// Create a template engine that only uses the embedded templates
    pub fn embedded_only() -> Self {
        Self { config_dir: None }
    }

    /// Get the XDG config directory for user templates
    fn default_config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("io", "devops", "architect")
            .map(|proj_dirs| proj_dirs.config_dir().join("templates"))
    }

    /// Initialize user template directory with default templates
    ///
    /// Existing files are never overwritten.
    pub fn init_user_templates(&self) -> Result<PathBuf> {
        let config_dir = self
            .config_dir
            .as_ref()
            .ok_or_else(|| Error::Internal("Could not determine config directory".to_string()))?;

        fs::create_dir_all(config_dir)?;

        for file_path in EmbeddedTemplates::iter() {
            let dest_path = config_dir.join(file_path.as_ref());

            if let Some(parent) = dest_path.parent() {
                fs::create_dir_all(parent)?;
            }

            if !dest_path.exists() {
                if let Some(file) = EmbeddedTemplates::get(&file_path) {
                    fs::write(&dest_path, file.data.as_ref())?;
                    tracing::debug!("Wrote template {}", dest_path.display());
                }
            }
        }

        Ok(config_dir.clone())
    }

    /// Render a template with the given context
    pub fn render<S: Serialize>(&self, template_name: &str, context: &S) -> Result<String> {
        let template_content = self.source(template_name)?;

        let mut env = Environment::new();
        env.set_auto_escape_callback(auto_escape_for);
        env.add_template(template_name, &template_content)?;

        let tmpl = env.get_template(template_name)?;
        Ok(tmpl.render(context)?)
    }

    /// Template source, preferring the user's override
    pub fn source(&self, template_name: &str) -> Result<String> {
        if let Some(ref config_dir) = self.config_dir {
            let user_template_path = config_dir.join(template_name);
            if user_template_path.is_file() {
                tracing::debug!("Using user template {}", user_template_path.display());
                return Ok(fs::read_to_string(&user_template_path)?);
            }
        }

        Self::embedded_source(template_name)
    }

    /// Get embedded template content
    fn embedded_source(template_name: &str) -> Result<String> {
        let file = EmbeddedTemplates::get(template_name)
            .ok_or_else(|| Error::Template(format!("Template not found: {}", template_name)))?;

        String::from_utf8(file.data.into_owned())
            .map_err(|_| Error::Template(format!("Template is not UTF-8: {}", template_name)))
    }

    /// Get the user override directory, if one is known
    pub fn config_dir(&self) -> Option<&Path> {
        self.config_dir.as_deref()
    }

    /// List all embedded templates
    pub fn list_templates(&self) -> Vec<String> {
        let mut names: Vec<String> = EmbeddedTemplates::iter().map(|s| s.to_string()).collect();
        names.sort();
        names
    }

    /// List embedded templates that have a user override
    pub fn overridden_templates(&self) -> Vec<String> {
        let Some(dir) = self.config_dir.as_ref() else {
            return Vec::new();
        };

        self.list_templates()
            .into_iter()
            .filter(|name| dir.join(name).is_file())
            .collect()
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn auto_escape_for(name: &str) -> AutoEscape {
    if name.ends_with(".html") || name.ends_with(".html.jinja") {
        AutoEscape::Html
    } else {
        AutoEscape::None
    }
}
