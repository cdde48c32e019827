// Status command for checking whether HyperTerm is installed

use crate::config_store::ConfigStore;
use crate::editor::ConfigEditor;
use crate::ui;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatusOutput {
    installed: bool,
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plugins: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local_plugins: Option<usize>,
}

/// Returns the process exit code: 0 when the config exists, 1 otherwise.
pub async fn status<S: ConfigStore>(
    editor: &ConfigEditor<S>,
    json: bool,
) -> anyhow::Result<i32> {
    let installed = editor.exists().await;
    let (plugins, local_plugins) = if installed {
        (
            Some(editor.plugins().await?.len()),
            Some(editor.local_plugins().await?.len()),
        )
    } else {
        (None, None)
    };

    let output = StatusOutput {
        installed,
        path: editor.location().display().to_string(),
        plugins,
        local_plugins,
    };

    if json {
        ui::plain(&serde_json::to_string_pretty(&output)?);
    } else if installed {
        ui::success(&format!("HyperTerm config found at {}", output.path));
        ui::status("plugins", &plugins.unwrap_or_default().to_string());
        ui::status("localPlugins", &local_plugins.unwrap_or_default().to_string());
    } else {
        ui::warning(&format!("HyperTerm config not found at {}", output.path));
        ui::action("Install HyperTerm and start it once to create the config.");
    }

    Ok(if installed { 0 } else { 1 })
}
