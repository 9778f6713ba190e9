//! Build documentation tree use case
//!
//! Walks the project's docs directory, processes every markdown page and
//! mirrors the result into the output directory. Other files are copied
//! unchanged so the output is a complete docs tree.

use crate::application::process_page::TableProcessor;
use crate::domain::ReaderRegistry;
use crate::error::{Result, TableReaderError};
use crate::infrastructure::Project;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Summary of a finished build
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub pages: usize,
    pub copied: usize,
    pub out_dir: PathBuf,
}

/// Service for building a whole docs tree
pub struct BuildDocsService {
    project: Project,
    registry: ReaderRegistry,
}

impl BuildDocsService {
    pub fn new(project: Project, registry: ReaderRegistry) -> Self {
        BuildDocsService { project, registry }
    }

    /// Build into `out_dir`, or the configured site directory
    ///
    /// # Errors
    ///
    /// Stops at the first page that fails to process; pages already written
    /// stay in the output directory.
    pub fn execute(&self, out_dir: Option<PathBuf>) -> Result<BuildReport> {
        let docs_dir = std::path::absolute(self.project.docs_dir())?;
        if !docs_dir.is_dir() {
            return Err(TableReaderError::Config(format!(
                "Docs directory not found: {}",
                docs_dir.display()
            )));
        }

        let out_dir = std::path::absolute(out_dir.unwrap_or_else(|| self.project.site_dir()))?;
        let processor = TableProcessor::new(&self.project, &self.registry);
        let mut report = BuildReport {
            out_dir: out_dir.clone(),
            ..BuildReport::default()
        };

        let walker = WalkDir::new(&docs_dir)
            .sort_by_file_name()
            .into_iter()
            // Skip the output directory when it lives inside docs
            .filter_entry(|e| e.path() != out_dir.as_path());

        for entry in walker {
            let entry = entry.map_err(|e| TableReaderError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let source_path = entry.path();
            let relative = source_path.strip_prefix(&docs_dir).map_err(|_| {
                TableReaderError::Config(format!(
                    "{} is outside the docs directory",
                    source_path.display()
                ))
            })?;
            let target = out_dir.join(relative);
            ensure_parent(&target)?;

            if is_markdown(source_path) {
                let source = fs::read_to_string(source_path)?;
                let page_dir = source_path.parent().unwrap_or(&docs_dir);
                let rendered = processor.process(&source, page_dir)?;
                fs::write(&target, rendered)?;
                log::info!("built {}", relative.display());
                report.pages += 1;
            } else {
                fs::copy(source_path, &target)?;
                report.copied += 1;
            }
        }

        Ok(report)
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md") || e.eq_ignore_ascii_case("markdown"))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
