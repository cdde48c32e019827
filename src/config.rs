// Config module for locating the HyperTerm config file

use crate::constants;
use anyhow::anyhow;
use std::path::PathBuf;

pub fn home_dir() -> anyhow::Result<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| anyhow!("cannot determine home directory"))
}

/// Default location: `~/.hyperterm.js`.
pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?.join(constants::CONFIG_FILE))
}

/// Use the `--config` override when given, otherwise the default location.
pub fn resolve(override_path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match override_path {
        Some(path) => Ok(path),
        None => config_path(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_prefers_override() {
        let path = resolve(Some(PathBuf::from("/tmp/custom.js"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.js"));
    }

    #[test]
    fn test_default_path_is_dotfile_in_home() {
        if let Ok(path) = config_path() {
            assert!(path.ends_with(".hyperterm.js"));
        }
    }
}
