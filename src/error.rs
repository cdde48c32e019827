// Error module for plugin list operations

use crate::plugin_list::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a config editor operation.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("plugin '{0}' is already installed")]
    AlreadyInstalled(String),

    #[error("plugin '{0}' is not installed")]
    NotInstalled(String),

    /// The underlying filesystem call failed. The io error is kept as is.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file doesn't match the layout we know how to edit.
    #[error("unrecognized config at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl PluginError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PluginError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
