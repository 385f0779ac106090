use anyhow::{Context, Result};
use architect_service::config::Config;
use clap::Subcommand;
use colored::Colorize;

use crate::utils;

#[derive(Subcommand)]
pub enum TemplatesCommands {
    /// List the embedded templates and which ones are overridden
    List,
    /// Copy the embedded templates into the user template directory
    Init,
}

pub fn execute(command: TemplatesCommands) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let engine = super::template_engine(&config);

    match command {
        TemplatesCommands::List => {
            let overridden = engine.overridden_templates();

            utils::section("Templates");
            for name in engine.list_templates() {
                if overridden.contains(&name) {
                    println!("  {} {}", name, "(overridden)".yellow());
                } else {
                    println!("  {}", name);
                }
            }

            match engine.config_dir() {
                Some(dir) => println!("\nOverride directory: {}", dir.display().to_string().dimmed()),
                None => utils::warning("No override directory could be determined"),
            }
        }
        TemplatesCommands::Init => {
            let dir = engine.init_user_templates()?;
            utils::success(&format!("Templates copied to {}", dir.display()));
            utils::info("Existing files were left untouched; edit them to customise the output");
        }
    }

    Ok(())
}
