// Install command for adding a plugin to the HyperTerm config

use crate::config_store::ConfigStore;
use crate::editor::ConfigEditor;
use crate::ui;

pub async fn install<S: ConfigStore>(
    editor: &ConfigEditor<S>,
    name: String,
) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("Plugin name must not be empty");
    }

    editor.install(&name).await?;

    ui::success(&format!("Installed {}", name));
    ui::dim("Reload HyperTerm to load the plugin.");
    Ok(())
}
