use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `Runner's Hub` - live carbon-plated racing shoe comparison.
#[derive(Parser, Debug)]
#[command(name = "runners-hub")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(
    about = "Compare the latest carbon-plated racing shoes with web-grounded AI.",
    long_about = None
)]
pub struct Cli {
    /// Display language (en, zh-TW); overrides config and RUNNERS_HUB_LOCALE
    #[arg(long, global = true)]
    pub locale: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one search and print the comparison
    Search {
        /// Write the infographic to this path (extension follows the image type when omitted)
        #[arg(long)]
        save_image: Option<PathBuf>,

        /// Print the final view state as JSON instead of the formatted page
        #[arg(long)]
        json: bool,
    },

    /// Serve the comparison page over HTTP
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Print both prompts built from the current configuration
    Prompts,

    /// Print the effective configuration with the API key redacted
    Config,
}
