use anyhow::{Context, Result};
use architect_service::{
    app_config::{AppConfig, ConfigField},
    config::Config,
    manifests::{ManifestKind, ManifestRenderer, RenderedManifest},
};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use std::path::{Path, PathBuf};

use crate::utils;

pub struct RenderArgs {
    pub kind: Option<String>,
    pub all: bool,
    pub sets: Vec<String>,
    pub app_config: Option<PathBuf>,
    pub interactive: bool,
    pub output: Option<PathBuf>,
    pub dry_run: bool,
    pub force: bool,
}

/// What happened to one manifest when writing to a directory
#[derive(Debug, PartialEq, Eq)]
enum WriteOutcome {
    Written,
    Skipped,
    WouldWrite,
}

pub async fn execute(args: RenderArgs) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    let mut app = super::resolve_app_config(&config.defaults, args.app_config.as_deref(), &args.sets)?;
    if args.interactive {
        app = prompt_fields(app)?;
    }

    let kinds = selected_kinds(args.kind.as_deref(), args.all)?;
    let renderer = ManifestRenderer::new(super::template_engine(&config));

    let manifests = kinds
        .into_iter()
        .map(|kind| renderer.render_manifest(kind, &app))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    match args.output {
        Some(dir) => write_manifests(&manifests, &dir, args.dry_run, args.force),
        None => {
            print_manifests(&manifests);
            Ok(())
        }
    }
}

fn selected_kinds(kind: Option<&str>, all: bool) -> Result<Vec<ManifestKind>> {
    if all {
        return Ok(ManifestKind::ALL.to_vec());
    }

    let kind = kind.context("Specify a manifest kind or --all")?;
    Ok(vec![kind.parse()?])
}

fn prompt_fields(mut app: AppConfig) -> Result<AppConfig> {
    let theme = ColorfulTheme::default();

    for field in ConfigField::ALL {
        let value: String = Input::with_theme(&theme)
            .with_prompt(field.label())
            .default(app.get(field))
            .validate_with(move |input: &String| -> std::result::Result<(), String> {
                AppConfig::default().set(field, input).map_err(|e| e.to_string())
            })
            .interact_text()?;

        app.set(field, &value)?;
    }

    Ok(app)
}

fn print_manifests(manifests: &[RenderedManifest]) {
    if let [single] = manifests {
        println!("{}", single.content);
        return;
    }

    for manifest in manifests {
        println!("# ---- {} ----", manifest.file_name);
        println!("{}\n", manifest.content);
    }
}

fn write_manifests(manifests: &[RenderedManifest], dir: &Path, dry_run: bool, force: bool) -> Result<()> {
    if dry_run {
        println!("\n{}", "Dry run - would generate:".bold());
    }

    let mut written = 0;
    for manifest in manifests {
        let path = dir.join(&manifest.file_name);
        match write_manifest(manifest, &path, dry_run, force)? {
            WriteOutcome::Written => {
                written += 1;
                println!("  {} {}", "✓".green(), manifest.file_name);
            }
            WriteOutcome::WouldWrite => println!("  • {}", manifest.file_name),
            WriteOutcome::Skipped => utils::warning(&format!(
                "{} exists, skipping (use --force to overwrite)",
                path.display()
            )),
        }
    }

    if !dry_run {
        utils::success(&format!("Wrote {} manifest(s) to {}", written, dir.display()));
    }

    Ok(())
}

fn write_manifest(manifest: &RenderedManifest, path: &Path, dry_run: bool, force: bool) -> Result<WriteOutcome> {
    if path.exists() && !force {
        return Ok(WriteOutcome::Skipped);
    }
    if dry_run {
        return Ok(WriteOutcome::WouldWrite);
    }

    let mut content = manifest.content.clone();
    content.push('\n');
    utils::write_file(path, &content)?;
    tracing::debug!("Wrote {}", path.display());

    Ok(WriteOutcome::Written)
}
