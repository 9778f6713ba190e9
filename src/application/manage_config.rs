//! Config management use case

use crate::error::{Result, TableReaderError};
use crate::infrastructure::{BasePath, Config, Project};
use std::str::FromStr;

/// Keys accepted by `get` and `set`
pub const CONFIG_KEYS: [&str; 5] = [
    "base_path",
    "data_path",
    "search_page_directory",
    "docs_dir",
    "site_dir",
];

/// Service for reading and editing table-reader.toml
pub struct ConfigService {
    project: Project,
}

impl ConfigService {
    pub fn new(project: Project) -> Self {
        ConfigService { project }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.project.config();

        match key {
            "base_path" => Ok(config.base_path.to_string()),
            "data_path" => Ok(config.data_path.clone()),
            "search_page_directory" => Ok(config.search_page_directory.to_string()),
            "docs_dir" => Ok(config.docs_dir.clone()),
            "site_dir" => Ok(config.site_dir.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a config value and save the file
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let config = self.project.config_mut();

        match key {
            "base_path" => {
                config.base_path = BasePath::from_str(value).map_err(TableReaderError::Config)?;
            }
            "data_path" => config.data_path = non_empty(key, value)?,
            "search_page_directory" => {
                config.search_page_directory = parse_bool(value)?;
            }
            "docs_dir" => config.docs_dir = non_empty(key, value)?,
            "site_dir" => config.site_dir = non_empty(key, value)?,
            _ => return Err(unknown_key(key)),
        }

        self.project.save_config()
    }

    /// All config values
    pub fn list(&self) -> &Config {
        self.project.config()
    }
}

fn unknown_key(key: &str) -> TableReaderError {
    TableReaderError::Config(format!(
        "Unknown config key: '{}'. Valid keys are: {}",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(TableReaderError::Config(format!("{} cannot be empty", key)));
    }
    Ok(value.to_string())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(TableReaderError::Config(format!(
            "Invalid boolean: '{}'. Use true or false",
            value
        ))),
    }
}
