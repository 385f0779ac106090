//! Manifest rendering
//!
//! Seven fixed templates are interpolated with an [`AppConfig`]. Rendering is
//! pure: the same record always produces the same seven strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::app_config::AppConfig;
use crate::error::{Error, Result};
use crate::template_engine::TemplateEngine;

/// The seven generated artifacts, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestKind {
    #[default]
    Docker,
    Deployment,
    Service,
    Ingress,
    Config,
    Hpa,
    Pipeline,
}

impl ManifestKind {
    pub const ALL: [ManifestKind; 7] = [
        ManifestKind::Docker,
        ManifestKind::Deployment,
        ManifestKind::Service,
        ManifestKind::Ingress,
        ManifestKind::Config,
        ManifestKind::Hpa,
        ManifestKind::Pipeline,
    ];

    /// Stable identifier used in URLs and on the command line
    pub fn id(self) -> &'static str {
        match self {
            ManifestKind::Docker => "docker",
            ManifestKind::Deployment => "deployment",
            ManifestKind::Service => "service",
            ManifestKind::Ingress => "ingress",
            ManifestKind::Config => "config",
            ManifestKind::Hpa => "hpa",
            ManifestKind::Pipeline => "pipeline",
        }
    }

    /// Tab label
    pub fn label(self) -> &'static str {
        match self {
            ManifestKind::Docker => "Dockerfile",
            ManifestKind::Deployment => "Deployment",
            ManifestKind::Service => "Service",
            ManifestKind::Ingress => "Ingress",
            ManifestKind::Config => "Config/Secret",
            ManifestKind::Hpa => "Autoscaler",
            ManifestKind::Pipeline => "GitHub Actions",
        }
    }

    /// Syntax name shown above the code panel
    pub fn language(self) -> &'static str {
        match self {
            ManifestKind::Docker => "dockerfile",
            _ => "yaml",
        }
    }

    /// Relative output path when written to disk
    pub fn file_name(self) -> &'static str {
        match self {
            ManifestKind::Docker => "Dockerfile",
            ManifestKind::Deployment => "k8s/deployment.yaml",
            ManifestKind::Service => "k8s/service.yaml",
            ManifestKind::Ingress => "k8s/ingress.yaml",
            ManifestKind::Config => "k8s/config.yaml",
            ManifestKind::Hpa => "k8s/hpa.yaml",
            ManifestKind::Pipeline => ".github/workflows/ci-cd.yml",
        }
    }

    /// Embedded template path
    pub fn template_name(self) -> &'static str {
        match self {
            ManifestKind::Docker => "manifests/dockerfile.jinja",
            ManifestKind::Deployment => "manifests/deployment.yaml.jinja",
            ManifestKind::Service => "manifests/service.yaml.jinja",
            ManifestKind::Ingress => "manifests/ingress.yaml.jinja",
            ManifestKind::Config => "manifests/config.yaml.jinja",
            ManifestKind::Hpa => "manifests/hpa.yaml.jinja",
            ManifestKind::Pipeline => "manifests/pipeline.yaml.jinja",
        }
    }
}

impl fmt::Display for ManifestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ManifestKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        ManifestKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted)
            .ok_or_else(|| Error::NotFound(format!("unknown manifest kind '{}'", s)))
    }
}

/// A manifest rendered for a particular config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedManifest {
    pub kind: ManifestKind,
    pub label: String,
    pub language: String,
    pub file_name: String,
    pub content: String,
}

/// All seven manifests, in tab order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSet {
    pub manifests: Vec<RenderedManifest>,
}

impl ManifestSet {
    /// Look up a manifest by kind
    pub fn get(&self, kind: ManifestKind) -> Option<&RenderedManifest> {
        self.manifests.iter().find(|m| m.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderedManifest> {
        self.manifests.iter()
    }
}

/// Renders manifests through the template engine
#[derive(Debug, Clone, Default)]
pub struct ManifestRenderer {
    engine: TemplateEngine,
}

impl ManifestRenderer {
    pub fn new(engine: TemplateEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Render one manifest; surrounding whitespace is trimmed
    pub fn render(&self, kind: ManifestKind, config: &AppConfig) -> Result<String> {
        let rendered = self.engine.render(kind.template_name(), config)?;
        Ok(rendered.trim().to_string())
    }

    /// Render one manifest with its display metadata
    pub fn render_manifest(&self, kind: ManifestKind, config: &AppConfig) -> Result<RenderedManifest> {
        Ok(RenderedManifest {
            kind,
            label: kind.label().to_string(),
            language: kind.language().to_string(),
            file_name: kind.file_name().to_string(),
            content: self.render(kind, config)?,
        })
    }

    /// Render all seven manifests
    pub fn render_all(&self, config: &AppConfig) -> Result<ManifestSet> {
        let manifests = ManifestKind::ALL
            .into_iter()
            .map(|kind| self.render_manifest(kind, config))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(app = %config.app_name, "Rendered {} manifests", manifests.len());

        Ok(ManifestSet { manifests })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> ManifestRenderer {
        ManifestRenderer::new(TemplateEngine::embedded_only())
    }

    fn custom_config() -> AppConfig {
        AppConfig {
            app_name: "billing".to_string(),
            image_name: "acme/billing".to_string(),
            container_port: 8081,
            replicas: 4,
            cpu_limit: "750m".to_string(),
            memory_limit: "1Gi".to_string(),
            domain: "billing.acme.io".to_string(),
            namespace: "payments".to_string(),
            registry: "ghcr.io".to_string(),
        }
    }

    #[test]
    fn test_kind_ids_round_trip() {
        for kind in ManifestKind::ALL {
            assert_eq!(kind.id().parse::<ManifestKind>().unwrap(), kind);
        }
        assert_eq!("HPA".parse::<ManifestKind>().unwrap(), ManifestKind::Hpa);
        assert!(matches!(
            "helm".parse::<ManifestKind>(),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_kind_serializes_as_id() {
        let json = serde_json::to_string(&ManifestKind::Pipeline).unwrap();
        assert_eq!(json, "\"pipeline\"");
    }

    #[test]
    fn test_dockerfile() {
        let docker = renderer()
            .render(ManifestKind::Docker, &custom_config())
            .unwrap();
        assert!(docker.starts_with("# Multi-stage build for optimal image size"));
        assert!(docker.contains("FROM node:20-alpine AS builder"));
        assert!(docker.contains("EXPOSE 8081\nUSER node"));
        assert!(docker.ends_with(r#"CMD ["node", "dist/index.js"]"#));
    }

    #[test]
    fn test_deployment() {
        let deployment = renderer()
            .render(ManifestKind::Deployment, &custom_config())
            .unwrap();
        assert!(deployment.starts_with("apiVersion: apps/v1\nkind: Deployment"));
        assert!(deployment.contains("  name: billing\n  namespace: payments\n"));
        assert!(deployment.contains("  replicas: 4\n"));
        assert!(deployment.contains("image: ghcr.io/acme/billing:latest"));
        assert!(deployment.contains("- containerPort: 8081"));
        assert!(deployment.contains("cpu: 750m"));
        assert!(deployment.contains("memory: 1Gi"));
        assert!(deployment.contains("path: /health"));
        assert!(deployment.contains("path: /ready"));
        assert!(deployment.contains("name: billing-config"));
        assert!(deployment.ends_with("name: billing-secrets"));
    }

    #[test]
    fn test_service() {
        let service = renderer()
            .render(ManifestKind::Service, &AppConfig::default())
            .unwrap();
        let expected = "apiVersion: v1
kind: Service
metadata:
  name: node-api
  namespace: production
spec:
  type: ClusterIP
  selector:
    app: node-api
  ports:
  - port: 80
    targetPort: 3000
    protocol: TCP";
        assert_eq!(service, expected);
    }

    #[test]
    fn test_ingress() {
        let ingress = renderer()
            .render(ManifestKind::Ingress, &custom_config())
            .unwrap();
        assert!(ingress.contains("name: billing-ingress"));
        assert!(ingress.contains("    - billing.acme.io\n    secretName: billing-tls"));
        assert!(ingress.contains("- host: billing.acme.io"));
        assert!(ingress.contains("cert-manager.io/cluster-issuer: letsencrypt-prod"));
    }

    #[test]
    fn test_config_and_secret() {
        let config = renderer()
            .render(ManifestKind::Config, &custom_config())
            .unwrap();
        let documents: Vec<&str> = config.split("\n---\n").collect();
        assert_eq!(documents.len(), 2);
        assert!(documents[0].contains("kind: ConfigMap"));
        assert!(documents[0].contains("name: billing-config"));
        assert!(documents[1].contains("kind: Secret"));
        assert!(documents[1].contains("name: billing-secrets"));
        assert!(documents[1].contains("DB_PASSWORD: bXktc2VjcmV0LXBhc3N3b3Jk"));
    }

    #[test]
    fn test_hpa() {
        let hpa = renderer()
            .render(ManifestKind::Hpa, &custom_config())
            .unwrap();
        assert!(hpa.contains("name: billing-hpa"));
        assert!(hpa.contains("minReplicas: 2\n  maxReplicas: 10"));
        assert!(hpa.contains("averageUtilization: 70"));
    }

    #[test]
    fn test_pipeline_keeps_github_expressions() {
        let pipeline = renderer()
            .render(ManifestKind::Pipeline, &custom_config())
            .unwrap();
        assert!(pipeline.starts_with("name: CI/CD Pipeline"));
        assert!(pipeline.contains("username: ${{ secrets.REGISTRY_USERNAME }}"));
        assert!(pipeline.contains("tags: ghcr.io/acme/billing:${{ github.sha }}"));
        assert!(pipeline.contains(
            "kubectl set image deployment/billing billing=ghcr.io/acme/billing:${{ github.sha }} -n payments"
        ));
    }

    #[test]
    fn test_values_are_not_escaped() {
        let mut config = AppConfig::default();
        config.domain = "<shop> & co".to_string();
        let ingress = renderer().render(ManifestKind::Ingress, &config).unwrap();
        assert!(ingress.contains("- host: <shop> & co"));
    }

    #[test]
    fn test_render_all_in_tab_order() {
        let set = renderer().render_all(&AppConfig::default()).unwrap();
        let kinds: Vec<ManifestKind> = set.iter().map(|m| m.kind).collect();
        assert_eq!(kinds, ManifestKind::ALL.to_vec());

        let hpa = set.get(ManifestKind::Hpa).unwrap();
        assert_eq!(hpa.label, "Autoscaler");
        assert_eq!(hpa.file_name, "k8s/hpa.yaml");
        assert_eq!(set.get(ManifestKind::Docker).unwrap().language, "dockerfile");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let r = renderer();
        let config = custom_config();
        assert_eq!(r.render_all(&config).unwrap(), r.render_all(&config).unwrap());
    }

    #[test]
    fn test_yaml_manifests_parse() {
        let set = renderer().render_all(&custom_config()).unwrap();
        for manifest in set.iter().filter(|m| m.language == "yaml") {
            for document in serde_yaml::Deserializer::from_str(&manifest.content) {
                let value = serde_yaml::Value::deserialize(document);
                assert!(value.is_ok(), "{} is not valid YAML: {:?}", manifest.kind, value);
            }
        }
    }
}
