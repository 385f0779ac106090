//! Server-rendered form page
//!
//! The page is fully usable without JavaScript: the form submits to `GET /`
//! with the nine fields and the selected tab. With JavaScript enabled the page
//! re-renders through the JSON API on every keystroke instead.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Serialize;
use std::collections::HashMap;

use crate::{
    advice::FALLBACK_ANSWER,
    app_config::{AppConfig, ConfigField},
    checklist::CHECKLIST,
    error::{Error, Result},
    manifests::{ManifestKind, ManifestSet},
    state::AppState,
};

const PAGE_TEMPLATE: &str = "ui/index.html.jinja";

#[derive(Debug, Serialize)]
struct FieldView {
    name: &'static str,
    label: &'static str,
    value: String,
    placeholder: &'static str,
    numeric: bool,
}

#[derive(Debug, Serialize)]
struct TabView {
    id: &'static str,
    label: &'static str,
    active: bool,
}

#[derive(Debug, Serialize)]
struct ActiveView {
    id: &'static str,
    label: &'static str,
    language: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct PageView {
    title: String,
    fields: Vec<FieldView>,
    tabs: Vec<TabView>,
    active: ActiveView,
    checklist: &'static [&'static str],
    errors: Vec<String>,
    state_json: String,
    fallback: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClientState<'a> {
    config: &'a AppConfig,
    active: ManifestKind,
    manifests: &'a ManifestSet,
}

/// Apply query parameters on top of the defaults
///
/// Unknown parameters are ignored. A field whose value does not parse keeps
/// its default, and the problem is reported back to the page.
fn config_from_query(defaults: &AppConfig, params: &HashMap<String, String>) -> (AppConfig, Vec<String>) {
    let mut config = defaults.clone();
    let mut errors = Vec::new();

    for field in ConfigField::ALL {
        if let Some(value) = params.get(field.json_name()) {
            if let Err(e) = config.set(field, value) {
                errors.push(match e {
                    Error::ValidationError(msg) => msg,
                    other => other.to_string(),
                });
            }
        }
    }

    (config, errors)
}

/// `GET /`
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Html<String>> {
    let (config, mut errors) = config_from_query(&state.config().defaults, &params);

    let active = match params.get("tab") {
        Some(tab) => tab.parse().unwrap_or_else(|_| {
            errors.push(format!("Unknown tab '{}'", tab));
            ManifestKind::default()
        }),
        None => ManifestKind::default(),
    };

    let manifests = state.renderer().render_all(&config)?;
    let active_content = manifests
        .get(active)
        .map(|m| m.content.clone())
        .unwrap_or_default();

    let state_json = serde_json::to_string(&ClientState {
        config: &config,
        active,
        manifests: &manifests,
    })
    .map_err(|e| Error::Internal(e.to_string()))?;

    let view = PageView {
        title: state.config().service.name.clone(),
        fields: ConfigField::ALL
            .into_iter()
            .map(|field| FieldView {
                name: field.json_name(),
                label: field.label(),
                value: config.get(field),
                placeholder: field.placeholder(),
                numeric: field.is_numeric(),
            })
            .collect(),
        tabs: ManifestKind::ALL
            .into_iter()
            .map(|kind| TabView {
                id: kind.id(),
                label: kind.label(),
                active: kind == active,
            })
            .collect(),
        active: ActiveView {
            id: active.id(),
            label: active.label(),
            language: active.language(),
            content: active_content,
        },
        checklist: &CHECKLIST,
        errors,
        state_json,
        fallback: FALLBACK_ANSWER,
    };

    let html = state.renderer().engine().render(PAGE_TEMPLATE, &view)?;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_query_overrides_defaults() {
        let (config, errors) = config_from_query(
            &AppConfig::default(),
            &params(&[("appName", "orders"), ("replicas", "7"), ("utm_source", "x")]),
        );
        assert!(errors.is_empty());
        assert_eq!(config.app_name, "orders");
        assert_eq!(config.replicas, 7);
        assert_eq!(config.namespace, "production");
    }

    #[test]
    fn test_bad_number_keeps_default_and_reports() {
        let (config, errors) = config_from_query(
            &AppConfig::default(),
            &params(&[("containerPort", "http"), ("domain", "x.io")]),
        );
        assert_eq!(config.container_port, 3000);
        assert_eq!(config.domain, "x.io");
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Container Port"));
    }
}
