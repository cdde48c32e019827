mod cli;
mod commands;
mod config;
mod config_store;
mod constants;
mod editor;
mod error;
mod plugin_list;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};
use config_store::FileStore;
use editor::ConfigEditor;
use error::PluginError;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            ui::error(&e.to_string());
            if e
                .downcast_ref::<PluginError>()
                .is_some_and(PluginError::is_not_found)
            {
                ui::action("Is HyperTerm installed? Start it once to create its config.");
            }
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let path = config::resolve(cli.config)?;
    log::debug!("Using config {}", path.display());
    let editor = ConfigEditor::new(FileStore::new(path));

    match cli.command {
        Commands::Install { name } => commands::install::install(&editor, name).await?,
        Commands::Uninstall { name } => commands::uninstall::uninstall(&editor, name).await?,
        Commands::List { local, json } => commands::list::list(&editor, local, json).await?,
        Commands::Status { json } => return commands::status::status(&editor, json).await,
    }

    Ok(0)
}
