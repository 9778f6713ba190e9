//! Application layer - Use cases and orchestration

pub mod build_docs;
pub mod init;
pub mod manage_config;
pub mod process_page;
pub mod render_page;

pub use build_docs::{BuildDocsService, BuildReport};
pub use manage_config::ConfigService;
pub use process_page::{process_document, TableProcessor};
pub use render_page::RenderPageService;
