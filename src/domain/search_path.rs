//! Ordered directories searched for table files

use std::fmt;
use std::path::{Path, PathBuf};

/// Directories checked, in priority order, when resolving a table path
///
/// The first directory containing the file wins; later directories are only
/// consulted when earlier ones miss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        SearchPath { dirs }
    }

    /// The configured data directory, then optionally the page's own directory
    pub fn for_page(data_path: &Path, page_dir: Option<&Path>) -> Self {
        let mut dirs = vec![data_path.to_path_buf()];
        if let Some(dir) = page_dir {
            dirs.push(dir.to_path_buf());
        }
        SearchPath { dirs }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Directories as display strings, in order
    pub fn display_list(&self) -> Vec<String> {
        self.dirs.iter().map(|d| d.display().to_string()).collect()
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_list().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_page_orders_data_dir_first() {
        let path = SearchPath::for_page(Path::new("./data"), Some(Path::new("docs/guide")));
        assert_eq!(
            path.dirs(),
            &[PathBuf::from("./data"), PathBuf::from("docs/guide")]
        );
        assert_eq!(path.to_string(), "./data, docs/guide");
    }

    #[test]
    fn test_for_page_without_page_dir() {
        let path = SearchPath::for_page(Path::new("."), None);
        assert_eq!(path.display_list(), vec!["."]);
        assert!(!path.is_empty());
    }
}
