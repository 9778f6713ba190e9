//! Project discovery and directory layout

use crate::domain::SearchPath;
use crate::error::{Result, TableReaderError};
use crate::infrastructure::config::{BasePath, Config, CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Environment variable naming the project root explicitly
pub const ROOT_ENV: &str = "TABLE_READER_ROOT";

/// A documentation project: the directory holding table-reader.toml and its settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    pub fn new(root: PathBuf, config: Config) -> Self {
        Project { root, config }
    }

    /// Load the project whose table-reader.toml lives in `root`
    pub fn load(root: &Path) -> Result<Self> {
        let config = Config::load_from_dir(root)?;
        Ok(Project::new(root.to_path_buf(), config))
    }

    /// Find the project for the current directory
    ///
    /// Checks TABLE_READER_ROOT first, then walks up from the current
    /// directory. Without a config file anywhere, the current directory is
    /// used with default settings.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV) {
            let path = PathBuf::from(root_path);
            if Self::has_config(&path) {
                return Project::load(&path);
            }
            return Err(TableReaderError::Config(format!(
                "{} is set to '{}' but no {} found there. \
                Run 'table-reader init' in that directory or unset {}.",
                ROOT_ENV,
                path.display(),
                CONFIG_FILE,
                ROOT_ENV
            )));
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Walk up from `start` looking for table-reader.toml
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = Some(start);

        while let Some(dir) = current {
            if Self::has_config(dir) {
                return Project::load(dir);
            }
            current = dir.parent();
        }

        log::debug!(
            "no {} found above {}, using defaults",
            CONFIG_FILE,
            start.display()
        );
        Ok(Project::new(start.to_path_buf(), Config::default()))
    }

    fn has_config(path: &Path) -> bool {
        path.join(CONFIG_FILE).is_file()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(&self.config.docs_dir)
    }

    pub fn site_dir(&self) -> PathBuf {
        self.root.join(&self.config.site_dir)
    }

    /// Directory that search directories are resolved against
    pub fn base_dir(&self) -> PathBuf {
        match self.config.base_path {
            BasePath::ConfigDir => self.root.clone(),
            BasePath::DocsDir => self.docs_dir(),
        }
    }

    /// Search directories for a page living in `page_dir`
    pub fn search_path(&self, page_dir: &Path) -> SearchPath {
        let page_dir = self.config.search_page_directory.then_some(page_dir);
        SearchPath::for_page(Path::new(&self.config.data_path), page_dir)
    }

    pub fn save_config(&self) -> Result<()> {
        self.config.save_to_dir(&self.root)
    }
}
