//! Configuration management

use crate::error::{Result, TableReaderError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "table-reader.toml";

/// Directory that anchors relative table paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BasePath {
    /// Directory holding table-reader.toml
    #[default]
    ConfigDir,
    /// The documentation source directory
    DocsDir,
}

impl FromStr for BasePath {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "config_dir" => Ok(BasePath::ConfigDir),
            "docs_dir" => Ok(BasePath::DocsDir),
            _ => Err(format!(
                "Invalid base_path: '{}'. Valid values are: config_dir, docs_dir",
                s
            )),
        }
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasePath::ConfigDir => f.write_str("config_dir"),
            BasePath::DocsDir => f.write_str("docs_dir"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_path: BasePath,
    /// First directory searched for table files, relative to the base path
    pub data_path: String,
    /// Also search the directory of the page containing the tag
    pub search_page_directory: bool,
    pub docs_dir: String,
    pub site_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_path: BasePath::ConfigDir,
            data_path: ".".to_string(),
            search_page_directory: true,
            docs_dir: "docs".to_string(),
            site_dir: "site".to_string(),
        }
    }
}

impl Config {
    /// Load config from table-reader.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TableReaderError::NotProjectDirectory(path.to_path_buf())
            } else {
                TableReaderError::Io(e)
            }
        })?;

        toml::from_str(&contents).map_err(|e| {
            TableReaderError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e))
        })
    }

    /// Save config to table-reader.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| TableReaderError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }
}
