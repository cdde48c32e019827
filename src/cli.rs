// CLI module for handling command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hpm")]
#[command(about = "Manage the plugin list in your HyperTerm config")]
#[command(version)]
pub struct Cli {
    /// Edit this file instead of ~/.hyperterm.js
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a plugin to the `plugins` list
    #[command(visible_alias = "i")]
    Install { name: String },

    /// Remove a plugin from the `plugins` list
    #[command(visible_aliases = ["u", "rm", "remove"])]
    Uninstall { name: String },

    /// Print installed plugins, one per line
    #[command(visible_alias = "ls")]
    List {
        /// Show `localPlugins` instead
        #[arg(long)]
        local: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether HyperTerm is installed
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
