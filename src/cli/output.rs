//! Output formatting utilities

use crate::application::BuildReport;
use crate::domain::ReaderRegistry;
use crate::infrastructure::Config;

/// Format the registered readers for display
pub fn format_reader_list(registry: &ReaderRegistry) -> String {
    if registry.is_empty() {
        return "No readers registered".to_string();
    }

    let mut output = String::new();
    for (name, reader) in registry.iter() {
        if reader.requires_working_dir() {
            output.push_str(&format!("{}  (runs in base directory)\n", name));
        } else {
            output.push_str(&format!("{}\n", name));
        }
    }
    output
}

/// One `key = value` line per setting
pub fn format_config(config: &Config) -> String {
    format!(
        "base_path = {}\ndata_path = {}\nsearch_page_directory = {}\ndocs_dir = {}\nsite_dir = {}\n",
        config.base_path,
        config.data_path,
        config.search_page_directory,
        config.docs_dir,
        config.site_dir
    )
}

pub fn format_build_report(report: &BuildReport) -> String {
    let pages = if report.pages == 1 { "page" } else { "pages" };
    let files = if report.copied == 1 { "file" } else { "files" };
    format!(
        "Built {} {}, copied {} {} into {}",
        report.pages,
        pages,
        report.copied,
        files,
        report.out_dir.display()
    )
}
