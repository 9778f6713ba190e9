//! Initialize project use case

use crate::error::{Result, TableReaderError};
use crate::infrastructure::{Config, CONFIG_FILE};
use std::fs;
use std::path::Path;

/// Write a default table-reader.toml into `path`, creating it if needed
pub fn init(path: &Path) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    if path.join(CONFIG_FILE).exists() {
        return Err(TableReaderError::Config(format!(
            "{} already initialized ({} exists)",
            path.display(),
            CONFIG_FILE
        )));
    }

    let config = Config::default();
    config.save_to_dir(path)?;
    log::info!("created {}", path.join(CONFIG_FILE).display());

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("new-project");

        let config = init(&root).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_from_dir(&root).unwrap(), Config::default());
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        init(temp.path()).unwrap();

        let err = init(temp.path()).unwrap_err();
        assert!(err.to_string().contains("already initialized"));
    }
}
