// Uninstall command for removing a plugin from the HyperTerm config

use crate::config_store::ConfigStore;
use crate::editor::ConfigEditor;
use crate::ui;

pub async fn uninstall<S: ConfigStore>(
    editor: &ConfigEditor<S>,
    name: String,
) -> anyhow::Result<()> {
    editor.uninstall(&name).await?;

    ui::success(&format!("Uninstalled {}", name));
    Ok(())
}
