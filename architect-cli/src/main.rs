use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod commands;
mod utils;

use commands::templates::TemplatesCommands;

/// architect - Dockerfile, Kubernetes and CI manifests for Node.js apps
#[derive(Parser)]
#[command(name = "architect")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web UI and JSON API
    Serve {
        /// Port to listen on (overrides configuration)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Configuration file to load instead of the search path
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Render manifests to stdout or to a directory
    Render {
        /// Manifest to render (docker, deployment, service, ingress, config, hpa, pipeline)
        #[arg(value_name = "KIND", required_unless_present = "all")]
        kind: Option<String>,

        /// Render every manifest
        #[arg(long, conflicts_with = "kind")]
        all: bool,

        /// Override a field, e.g. --set replicas=5
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,

        /// Read the app settings from a JSON or TOML file
        #[arg(long, value_name = "FILE")]
        app_config: Option<PathBuf>,

        /// Prompt for each field
        #[arg(short, long)]
        interactive: bool,

        /// Write files under this directory instead of printing
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Show what would be written without writing
        #[arg(long)]
        dry_run: bool,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
    /// Ask the DevOps advisor a question
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,

        /// Override a field of the app the question is about
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        sets: Vec<String>,
    },
    /// Print the production readiness checklist
    Checklist,
    /// Manage manifest template overrides
    Templates {
        #[command(subcommand)]
        command: TemplatesCommands,
    },
    /// Print shell completions to stdout
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose && !matches!(cli.command, Commands::Serve { .. }) {
        architect_service::observability::init_cli_tracing("debug");
    }

    let result = match cli.command {
        Commands::Serve { port, config } => commands::serve::execute(port, config).await,
        Commands::Render {
            kind,
            all,
            sets,
            app_config,
            interactive,
            output,
            dry_run,
            force,
        } => {
            commands::render::execute(commands::render::RenderArgs {
                kind,
                all,
                sets,
                app_config,
                interactive,
                output,
                dry_run,
                force,
            })
            .await
        }
        Commands::Ask { question, sets } => commands::ask::execute(question, sets).await,
        Commands::Checklist => commands::checklist::execute(),
        Commands::Templates { command } => commands::templates::execute(command),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);

            if let Some(source) = e.source() {
                eprintln!("\n{} {}", "Caused by:".yellow(), source);
            }

            std::process::exit(1);
        }
    }
}
