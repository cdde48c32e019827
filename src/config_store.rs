// Storage seam for the HyperTerm config file

use crate::error::PluginError;
use log::debug;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Where the config text lives.
///
/// The editor only ever needs whole-file reads and writes, so a store is
/// anything that can hand back the current text and replace it.
#[async_trait::async_trait]
pub trait ConfigStore: Send + Sync {
    /// Whether the config is present. Never fails.
    async fn exists(&self) -> bool;

    async fn read(&self) -> Result<String, PluginError>;

    /// Replace the whole config. Completes only once the data is written.
    async fn write(&self, contents: &str) -> Result<(), PluginError>;

    /// Path reported in errors.
    fn location(&self) -> &Path;
}

/// Config stored on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> PluginError {
        PluginError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait::async_trait]
impl ConfigStore for FileStore {
    async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn read(&self) -> Result<String, PluginError> {
        debug!("Reading {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.io_error(e))
    }

    async fn write(&self, contents: &str) -> Result<(), PluginError> {
        debug!("Writing {} ({} bytes)", self.path.display(), contents.len());
        // Never create the file: it belongs to HyperTerm.
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(contents.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush()
            .await
            .map_err(|e| self.io_error(e))
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// In-memory store used to drive the editor in tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    contents: std::sync::Mutex<Option<String>>,
    writes: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_contents(contents: &str) -> Self {
        Self {
            contents: std::sync::Mutex::new(Some(contents.to_string())),
            writes: Default::default(),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().unwrap().clone()
    }

    pub fn writes(&self) -> usize {
        self.writes.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl ConfigStore for MemoryStore {
    async fn exists(&self) -> bool {
        self.contents.lock().unwrap().is_some()
    }

    async fn read(&self) -> Result<String, PluginError> {
        self.contents
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| PluginError::Io {
                path: self.location().to_path_buf(),
                source: std::io::ErrorKind::NotFound.into(),
            })
    }

    async fn write(&self, contents: &str) -> Result<(), PluginError> {
        let mut guard = self.contents.lock().unwrap();
        if guard.is_none() {
            return Err(PluginError::Io {
                path: self.location().to_path_buf(),
                source: std::io::ErrorKind::NotFound.into(),
            });
        }
        *guard = Some(contents.to_string());
        self.writes.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> &Path {
        Path::new("memory://.hyperterm.js")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".hyperterm.js");
        std::fs::write(&path, "module.exports = {plugins: []};").unwrap();

        let store = FileStore::new(&path);
        assert!(store.exists().await);
        assert_eq!(store.read().await.unwrap(), "module.exports = {plugins: []};");

        store.write("module.exports = {};").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "module.exports = {};");
        assert_eq!(store.location(), path.as_path());
    }

    #[tokio::test]
    async fn test_file_store_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".hyperterm.js");
        let store = FileStore::new(&path);

        assert!(!store.exists().await);
        assert!(store.read().await.unwrap_err().is_not_found());
        assert!(store.write("x").await.unwrap_err().is_not_found());
        // A failed write must not leave a file behind.
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_memory_store_counts_writes() {
        let store = MemoryStore::with_contents("a");
        store.write("b").await.unwrap();
        assert_eq!(store.contents().as_deref(), Some("b"));
        assert_eq!(store.writes(), 1);

        let empty = MemoryStore::default();
        assert!(!empty.exists().await);
        assert!(empty.write("x").await.is_err());
    }
}
