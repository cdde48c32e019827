// Editor module for querying and mutating the HyperTerm plugin list

use crate::config_store::ConfigStore;
use crate::constants::{LOCAL_PLUGINS_FIELD, PLUGINS_FIELD};
use crate::error::PluginError;
use crate::plugin_list::{self, ArrayField, ParseError};
use log::{debug, info};
use std::path::Path;

/// Reads and rewrites the `plugins` array of a HyperTerm config.
///
/// Every call goes back to the store: nothing is cached between operations,
/// so two editors racing on the same file is last-writer-wins.
pub struct ConfigEditor<S> {
    store: S,
}

impl<S: ConfigStore> ConfigEditor<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn location(&self) -> &Path {
        self.store.location()
    }

    /// Whether HyperTerm's config is present.
    pub async fn exists(&self) -> bool {
        self.store.exists().await
    }

    /// Installed plugins in stored order. A config without a `plugins`
    /// field has none.
    pub async fn plugins(&self) -> Result<Vec<String>, PluginError> {
        let source = self.store.read().await?;
        Ok(self
            .field(&source, PLUGINS_FIELD)?
            .map(|f| f.entries)
            .unwrap_or_default())
    }

    /// Entries of `localPlugins`. Read-only: nothing here ever rewrites it.
    pub async fn local_plugins(&self) -> Result<Vec<String>, PluginError> {
        let source = self.store.read().await?;
        Ok(self
            .field(&source, LOCAL_PLUGINS_FIELD)?
            .map(|f| f.entries)
            .unwrap_or_default())
    }

    pub async fn is_installed(&self, name: &str) -> Result<bool, PluginError> {
        Ok(self.plugins().await?.iter().any(|p| p == name))
    }

    /// One name per line, in stored order.
    pub async fn list(&self) -> Result<String, PluginError> {
        Ok(self.plugins().await?.join("\n"))
    }

    pub async fn list_local(&self) -> Result<String, PluginError> {
        Ok(self.local_plugins().await?.join("\n"))
    }

    /// Append `name` to the plugin list.
    pub async fn install(&self, name: &str) -> Result<(), PluginError> {
        let source = self.store.read().await?;
        let field = self.required_field(&source)?;

        if field.entries.iter().any(|p| p == name) {
            return Err(PluginError::AlreadyInstalled(name.to_string()));
        }

        let mut entries = field.entries.clone();
        entries.push(name.to_string());
        self.store.write(&field.splice(&source, &entries)).await?;

        info!("Installed plugin '{}'", name);
        Ok(())
    }

    /// Remove `name` from the plugin list.
    pub async fn uninstall(&self, name: &str) -> Result<(), PluginError> {
        let source = self.store.read().await?;
        let field = self.required_field(&source)?;

        let Some(index) = field.entries.iter().position(|p| p == name) else {
            return Err(PluginError::NotInstalled(name.to_string()));
        };

        let mut entries = field.entries.clone();
        entries.remove(index);
        self.store.write(&field.splice(&source, &entries)).await?;

        info!("Uninstalled plugin '{}'", name);
        Ok(())
    }

    fn field(&self, source: &str, name: &str) -> Result<Option<ArrayField>, PluginError> {
        let field = plugin_list::find_field(source, name).map_err(|e| self.malformed(e))?;
        debug!(
            "Field '{}' in {}: {:?}",
            name,
            self.store.location().display(),
            field.as_ref().map(|f| &f.entries)
        );
        Ok(field)
    }

    // Mutations need an existing array to splice into; we don't invent one.
    fn required_field(&self, source: &str) -> Result<ArrayField, PluginError> {
        self.field(source, PLUGINS_FIELD)?
            .ok_or_else(|| self.malformed(ParseError::MissingField(PLUGINS_FIELD.to_string())))
    }

    fn malformed(&self, source: ParseError) -> PluginError {
        PluginError::Malformed {
            path: self.store.location().to_path_buf(),
            source,
        }
    }
}
