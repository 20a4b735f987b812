//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod run;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Show a single product.
    pub id: Option<String>,
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Script file, or `-` for stdin.
    pub script: String,

    /// Report failing lines and continue instead of stopping.
    #[arg(short, long)]
    pub keep_going: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Output path.
        #[arg(default_value = "store.toml")]
        path: String,

        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
