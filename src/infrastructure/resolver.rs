//! Resolving table paths against the search directories

use crate::domain::SearchPath;
use crate::error::{Result, TableReaderError};
use std::path::{Component, Path, PathBuf};

/// Finds table files in a [`SearchPath`]
pub struct PathResolver;

impl PathResolver {
    /// Absolute path of `candidate` in the first search directory containing it
    ///
    /// Each directory is taken relative to `base_dir`. An absolute `candidate`
    /// is checked as-is. Only existence checks are made; the process working
    /// directory is never changed.
    ///
    /// # Errors
    ///
    /// `FileNotFound` naming `candidate` and every directory tried, in order.
    pub fn resolve(candidate: &str, search_path: &SearchPath, base_dir: &Path) -> Result<PathBuf> {
        let base_dir = std::path::absolute(base_dir)?;

        for dir in search_path.dirs() {
            let path = clean_path(&base_dir.join(dir).join(candidate));
            if path.is_file() {
                log::debug!("resolved '{}' to {}", candidate, path.display());
                return Ok(path);
            }
            log::debug!("'{}' not found in {}", candidate, base_dir.join(dir).display());
        }

        Err(TableReaderError::FileNotFound {
            path: candidate.to_string(),
            searched: search_path.display_list(),
        })
    }
}

/// Drop `.` components so resolved paths read cleanly
fn clean_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
