// List command for printing the plugins registered in the HyperTerm config

use crate::config_store::ConfigStore;
use crate::editor::ConfigEditor;
use crate::ui;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListOutput {
    field: &'static str,
    plugins: Vec<String>,
}

pub async fn list<S: ConfigStore>(
    editor: &ConfigEditor<S>,
    local: bool,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        let output = if local {
            ListOutput {
                field: crate::constants::LOCAL_PLUGINS_FIELD,
                plugins: editor.local_plugins().await?,
            }
        } else {
            ListOutput {
                field: crate::constants::PLUGINS_FIELD,
                plugins: editor.plugins().await?,
            }
        };
        ui::plain(&serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let listing = if local {
        editor.list_local().await?
    } else {
        editor.list().await?
    };

    if listing.is_empty() {
        ui::dim(if local {
            "No local plugins."
        } else {
            "No plugins installed."
        });
    } else {
        ui::plain(&listing);
    }
    Ok(())
}
