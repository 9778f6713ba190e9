//! Render a single page use case

use crate::application::process_page::TableProcessor;
use crate::domain::ReaderRegistry;
use crate::error::Result;
use crate::infrastructure::Project;
use std::fs;
use std::path::{Path, PathBuf};

/// Service for processing one markdown page
pub struct RenderPageService {
    project: Project,
    registry: ReaderRegistry,
}

impl RenderPageService {
    pub fn new(project: Project, registry: ReaderRegistry) -> Self {
        RenderPageService { project, registry }
    }

    /// Process the page at `page` and return its new markdown
    ///
    /// When `output` is given the result is also written there; the source
    /// page itself is never modified.
    pub fn execute(&self, page: &Path, output: Option<&Path>) -> Result<String> {
        let page = std::path::absolute(page)?;
        let source = fs::read_to_string(&page)?;
        let page_dir = page.parent().map(Path::to_path_buf).unwrap_or_else(PathBuf::new);

        let rendered = TableProcessor::new(&self.project, &self.registry).process(&source, &page_dir)?;

        if let Some(output) = output {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(output, &rendered)?;
            log::info!("wrote {}", output.display());
        }

        Ok(rendered)
    }
}
