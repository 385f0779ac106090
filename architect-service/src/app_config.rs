//! The application parameters a user edits in the form
//!
//! Every manifest is derived from a single [`AppConfig`]. The record has nine
//! independent scalar fields and no cross-field rules; the only check applied
//! to user input is the numeric cast for the port and replica count.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Parameters of the application being containerized
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Kubernetes object name and label value
    pub app_name: String,

    /// Image repository, without the registry host
    pub image_name: String,

    /// Port the container listens on
    pub container_port: u16,

    /// Deployment replica count
    pub replicas: u32,

    /// CPU limit, in Kubernetes quantity notation
    pub cpu_limit: String,

    /// Memory limit, in Kubernetes quantity notation
    pub memory_limit: String,

    /// Ingress host
    pub domain: String,

    /// Target namespace
    pub namespace: String,

    /// Container registry host
    pub registry: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_name: "node-api".to_string(),
            image_name: "my-org/node-api".to_string(),
            container_port: 3000,
            replicas: 3,
            cpu_limit: "500m".to_string(),
            memory_limit: "512Mi".to_string(),
            domain: "api.example.com".to_string(),
            namespace: "production".to_string(),
            registry: "docker.io".to_string(),
        }
    }
}

impl AppConfig {
    /// Fully qualified image reference without a tag
    pub fn image_ref(&self) -> String {
        format!("{}/{}", self.registry, self.image_name)
    }

    /// Read a field as the string shown in the form
    pub fn get(&self, field: ConfigField) -> String {
        match field {
            ConfigField::AppName => self.app_name.clone(),
            ConfigField::ImageName => self.image_name.clone(),
            ConfigField::ContainerPort => self.container_port.to_string(),
            ConfigField::Replicas => self.replicas.to_string(),
            ConfigField::CpuLimit => self.cpu_limit.clone(),
            ConfigField::MemoryLimit => self.memory_limit.clone(),
            ConfigField::Domain => self.domain.clone(),
            ConfigField::Namespace => self.namespace.clone(),
            ConfigField::Registry => self.registry.clone(),
        }
    }

    /// Assign a raw form value to a field
    ///
    /// String fields take the value verbatim. Numeric fields are cast from the
    /// trimmed value; on failure the record is left untouched.
    pub fn set(&mut self, field: ConfigField, value: &str) -> Result<()> {
        match field {
            ConfigField::AppName => self.app_name = value.to_string(),
            ConfigField::ImageName => self.image_name = value.to_string(),
            ConfigField::ContainerPort => self.container_port = parse_number(field, value)?,
            ConfigField::Replicas => self.replicas = parse_number(field, value)?,
            ConfigField::CpuLimit => self.cpu_limit = value.to_string(),
            ConfigField::MemoryLimit => self.memory_limit = value.to_string(),
            ConfigField::Domain => self.domain = value.to_string(),
            ConfigField::Namespace => self.namespace = value.to_string(),
            ConfigField::Registry => self.registry = value.to_string(),
        }
        Ok(())
    }

    /// Apply a `field=value` assignment, as given on the command line
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<()> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            Error::BadRequest(format!(
                "expected FIELD=VALUE, got '{}'",
                assignment
            ))
        })?;
        let field: ConfigField = name.trim().parse()?;
        self.set(field, value)
    }
}

fn parse_number<T: FromStr>(field: ConfigField, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::ValidationError(format!(
            "{} must be a whole number, got '{}'",
            field.label(),
            value
        ))
    })
}

/// One of the nine editable fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    AppName,
    ImageName,
    ContainerPort,
    Replicas,
    CpuLimit,
    MemoryLimit,
    Domain,
    Namespace,
    Registry,
}

impl ConfigField {
    /// All fields, in form order
    pub const ALL: [ConfigField; 9] = [
        ConfigField::AppName,
        ConfigField::ContainerPort,
        ConfigField::Replicas,
        ConfigField::ImageName,
        ConfigField::Registry,
        ConfigField::CpuLimit,
        ConfigField::MemoryLimit,
        ConfigField::Domain,
        ConfigField::Namespace,
    ];

    /// Name used in JSON bodies and form inputs
    pub fn json_name(self) -> &'static str {
        match self {
            ConfigField::AppName => "appName",
            ConfigField::ImageName => "imageName",
            ConfigField::ContainerPort => "containerPort",
            ConfigField::Replicas => "replicas",
            ConfigField::CpuLimit => "cpuLimit",
            ConfigField::MemoryLimit => "memoryLimit",
            ConfigField::Domain => "domain",
            ConfigField::Namespace => "namespace",
            ConfigField::Registry => "registry",
        }
    }

    /// Name used on the command line
    pub fn cli_name(self) -> &'static str {
        match self {
            ConfigField::AppName => "app-name",
            ConfigField::ImageName => "image-name",
            ConfigField::ContainerPort => "container-port",
            ConfigField::Replicas => "replicas",
            ConfigField::CpuLimit => "cpu-limit",
            ConfigField::MemoryLimit => "memory-limit",
            ConfigField::Domain => "domain",
            ConfigField::Namespace => "namespace",
            ConfigField::Registry => "registry",
        }
    }

    /// Human-readable form label
    pub fn label(self) -> &'static str {
        match self {
            ConfigField::AppName => "App Name",
            ConfigField::ImageName => "Docker Image Name",
            ConfigField::ContainerPort => "Container Port",
            ConfigField::Replicas => "Replicas",
            ConfigField::CpuLimit => "CPU Limit",
            ConfigField::MemoryLimit => "Memory Limit",
            ConfigField::Domain => "Domain (Ingress)",
            ConfigField::Namespace => "Namespace",
            ConfigField::Registry => "Registry",
        }
    }

    /// Placeholder hint shown in an empty input
    pub fn placeholder(self) -> &'static str {
        match self {
            ConfigField::AppName => "my-awesome-app",
            ConfigField::ImageName => "username/repo-name",
            ConfigField::ContainerPort => "3000",
            ConfigField::Replicas => "3",
            ConfigField::CpuLimit => "500m",
            ConfigField::MemoryLimit => "512Mi",
            ConfigField::Domain => "app.example.com",
            ConfigField::Namespace => "default",
            ConfigField::Registry => "docker.io",
        }
    }

    /// Whether the field holds an integer
    pub fn is_numeric(self) -> bool {
        matches!(self, ConfigField::ContainerPort | ConfigField::Replicas)
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_name())
    }
}

impl FromStr for ConfigField {
    type Err = Error;

    /// Accepts the camelCase, kebab-case, or snake_case spelling
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        ConfigField::ALL
            .into_iter()
            .find(|field| field.json_name().to_lowercase() == normalized)
            .ok_or_else(|| Error::BadRequest(format!("unknown config field '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.app_name, "node-api");
        assert_eq!(config.container_port, 3000);
        assert_eq!(config.replicas, 3);
        assert_eq!(config.image_ref(), "docker.io/my-org/node-api");
    }

    #[test]
    fn test_field_name_spellings() {
        assert_eq!("appName".parse::<ConfigField>().unwrap(), ConfigField::AppName);
        assert_eq!("app-name".parse::<ConfigField>().unwrap(), ConfigField::AppName);
        assert_eq!("memory_limit".parse::<ConfigField>().unwrap(), ConfigField::MemoryLimit);
        assert_eq!("REPLICAS".parse::<ConfigField>().unwrap(), ConfigField::Replicas);
        assert!("port".parse::<ConfigField>().is_err());
    }

    #[test]
    fn test_set_string_field_is_verbatim() {
        let mut config = AppConfig::default();
        config.set(ConfigField::Domain, " shop.example.org ").unwrap();
        assert_eq!(config.domain, " shop.example.org ");

        config.set(ConfigField::Namespace, "").unwrap();
        assert_eq!(config.namespace, "");
    }

    #[test]
    fn test_set_numeric_field_casts() {
        let mut config = AppConfig::default();
        config.set(ConfigField::ContainerPort, " 8080 ").unwrap();
        config.set(ConfigField::Replicas, "5").unwrap();
        assert_eq!(config.container_port, 8080);
        assert_eq!(config.replicas, 5);
    }

    #[test]
    fn test_invalid_numeric_leaves_record_unchanged() {
        let mut config = AppConfig::default();
        let err = config.set(ConfigField::Replicas, "three").unwrap_err();
        assert!(matches!(err, Error::ValidationError(_)));
        assert_eq!(config, AppConfig::default());

        assert!(config.set(ConfigField::ContainerPort, "70000").is_err());
        assert!(config.set(ConfigField::ContainerPort, "").is_err());
        assert_eq!(config.container_port, 3000);
    }

    #[test]
    fn test_get_round_trips_through_set() {
        let mut config = AppConfig::default();
        for field in ConfigField::ALL {
            let value = config.get(field);
            config.set(field, &value).unwrap();
        }
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_apply_assignment() {
        let mut config = AppConfig::default();
        config.apply_assignment("image-name=acme/shop").unwrap();
        config.apply_assignment("containerPort=9000").unwrap();
        config.apply_assignment("domain=a=b.example.com").unwrap();
        assert_eq!(config.image_name, "acme/shop");
        assert_eq!(config.container_port, 9000);
        assert_eq!(config.domain, "a=b.example.com");

        assert!(config.apply_assignment("replicas").is_err());
        assert!(config.apply_assignment("bogus=1").is_err());
    }

    #[test]
    fn test_json_uses_camel_case_and_fills_missing_fields() {
        let config: AppConfig =
            serde_json::from_str(r#"{"appName":"billing","replicas":1}"#).unwrap();
        assert_eq!(config.app_name, "billing");
        assert_eq!(config.replicas, 1);
        assert_eq!(config.registry, "docker.io");

        let json = serde_json::to_value(AppConfig::default()).unwrap();
        assert_eq!(json["containerPort"], 3000);
        assert_eq!(json["memoryLimit"], "512Mi");
    }
}
