use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "sitewatch",
    version,
    about = "Detect meaningful content changes on monitored web pages"
)]
pub struct Cli {
    /// Path of the RON config file; defaults apply when it is missing.
    #[arg(long, global = true, default_value = "sitewatch.ron")]
    pub config: PathBuf,

    /// Print responses as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a site to monitor.
    Add { name: String, url: String },
    /// List monitored sites and their last known state.
    List,
    /// Check every site, or a single one with --id.
    Check {
        #[arg(long)]
        id: Option<String>,
    },
    /// Stop monitoring a site and delete its record.
    Remove { id: String },
    /// Write a config file populated with the defaults.
    InitConfig,
}
