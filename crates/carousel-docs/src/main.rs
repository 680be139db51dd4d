//! carousel-docs CLI - sandbox links and navigation routes for the carousel docs.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "carousel-docs")]
#[command(about = "Sandbox links and navigation routes for the carousel documentation")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to carousel-docs.toml config file
    #[arg(short, long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and starter example sources
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate a sandbox link for an example and open it
    Sandbox {
        /// Example id
        example: String,

        /// Sandbox variant (vanilla-js, vanilla-ts, react-js, react-ts)
        #[arg(short, long, default_value = "vanilla-js")]
        kind: String,

        /// Print the link without opening a browser
        #[arg(long)]
        no_open: bool,
    },

    /// Print the generated file map of an example as JSON
    Files {
        /// Example id
        example: String,

        /// Sandbox variant (vanilla-js, vanilla-ts, react-js, react-ts)
        #[arg(short, long, default_value = "vanilla-js")]
        kind: String,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the navigation routes of the docs
    Routes {
        /// Read an allMdx query result instead of scanning the docs directory
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the flat list instead of the nested tree
        #[arg(long)]
        flat: bool,
    },

    /// List examples and the sandbox variants they offer
    Examples,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Sandbox {
            example,
            kind,
            no_open,
        } => {
            commands::sandbox::run(&cli.config, &example, &kind, !no_open).await?;
        }
        Commands::Files {
            example,
            kind,
            output,
        } => {
            commands::files::run(&cli.config, &example, &kind, output).await?;
        }
        Commands::Routes { input, flat } => {
            commands::routes::run(&cli.config, input, flat).await?;
        }
        Commands::Examples => {
            commands::examples::run(&cli.config).await?;
        }
    }

    Ok(())
}
