//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: ARCHITECT_, nested keys separated by `__`)
//! 2. `GEMINI_API_KEY` / `API_KEY` for the advice API key
//! 3. Current working directory: ./config.toml
//! 4. XDG config directory: ~/.config/architect/config.toml
//! 5. System directory: /etc/architect/config.toml
//! 6. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_config::AppConfig;
use crate::error::Result;

const APP_DIR: &str = "architect";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Middleware configuration
    #[serde(default)]
    pub middleware: MiddlewareConfig,

    /// Advice API configuration
    #[serde(default)]
    pub advice: AdviceConfig,

    /// Template override configuration
    #[serde(default)]
    pub templates: TemplatesConfig,

    /// Initial values for the application form
    #[serde(default)]
    pub defaults: AppConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Middleware configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Request body size limit in MB
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,

    /// CORS configuration
    #[serde(default = "default_cors_mode")]
    pub cors_mode: String,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            body_limit_mb: default_body_limit_mb(),
            cors_mode: default_cors_mode(),
        }
    }
}

/// Hosted text-generation API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceConfig {
    /// API key; advice falls back to a fixed message when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base URL
    #[serde(default = "default_advice_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_advice_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_advice_timeout")]
    pub timeout_secs: u64,

    /// System instruction sent with every question
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
}

impl Default for AdviceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_advice_base_url(),
            model: default_advice_model(),
            timeout_secs: default_advice_timeout(),
            system_instruction: default_system_instruction(),
        }
    }
}

impl AdviceConfig {
    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Template override configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplatesConfig {
    /// Directory holding user template overrides (defaults to the XDG location)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_body_limit_mb() -> usize {
    1
}

fn default_cors_mode() -> String {
    "restrictive".to_string()
}

fn default_advice_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_advice_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_advice_timeout() -> u64 {
    60
}

fn default_system_instruction() -> String {
    "You are a senior DevOps Engineer with 15 years of experience in Kubernetes, Docker, and CI/CD. \
     Provide concise, accurate, and professional advice. Focus on security, scalability, and best practices."
        .to_string()
}

impl Config {
    /// Load configuration from all sources
    ///
    /// Searches for config files in this order (first found wins):
    /// 1. Current working directory: ./config.toml
    /// 2. XDG config directory: ~/.config/architect/config.toml
    /// 3. System directory: /etc/architect/config.toml
    ///
    /// Environment variables override all file-based configs.
    pub fn load() -> Result<Self> {
        let config_paths = Self::find_config_paths();

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first, so higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        Ok(Self::with_env(figment).extract()?)
    }

    /// Load configuration from a specific file
    ///
    /// This bypasses the search path and loads directly from the given path.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()));

        Ok(Self::with_env(figment).extract()?)
    }

    fn with_env(figment: Figment) -> Figment {
        figment
            .merge(Env::raw().only(&["API_KEY"]).map(|_| "advice.api_key".into()))
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "advice.api_key".into()),
            )
            .merge(Env::prefixed("ARCHITECT_").split("__"))
    }

    /// Find all possible config file paths
    ///
    /// Returns paths in priority order (highest first).
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(APP_DIR);
        if let Some(path) = xdg_dirs.find_config_file("config.toml") {
            paths.push(path);
        }

        paths.push(PathBuf::from("/etc").join(APP_DIR).join("config.toml"));

        paths
    }

    /// Get the recommended user config path
    ///
    /// Returns: ~/.config/architect/config.toml
    pub fn recommended_path() -> PathBuf {
        // place_config_file creates parent directories if needed
        xdg::BaseDirectories::with_prefix(APP_DIR)
            .place_config_file("config.toml")
            .unwrap_or_else(|_| {
                PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| String::from("~")))
                    .join(".config")
                    .join(APP_DIR)
                    .join("config.toml")
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "devops-architect".to_string(),
                port: default_port(),
                log_level: default_log_level(),
                timeout_secs: default_timeout(),
                environment: default_environment(),
            },
            middleware: MiddlewareConfig::default(),
            advice: AdviceConfig::default(),
            templates: TemplatesConfig::default(),
            defaults: AppConfig::default(),
        }
    }
}
