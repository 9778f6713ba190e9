//! Scoped change of the process working directory

use crate::error::Result;
use std::env;
use std::path::{Path, PathBuf};

/// Serializes tests that change the process working directory
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Sets the working directory on creation and restores the previous one on drop
///
/// Restoration happens on every exit path, including early returns and
/// panics while the guard is alive.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub fn change_to(dir: &Path) -> Result<Self> {
        let previous = env::current_dir()?;
        env::set_current_dir(dir)?;
        log::debug!("working directory set to {}", dir.display());
        Ok(WorkingDirGuard { previous })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            log::warn!(
                "could not restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}
