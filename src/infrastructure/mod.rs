//! Infrastructure layer - Configuration, file resolution and readers

pub mod config;
pub mod project;
pub mod readers;
pub mod resolver;
pub mod workdir;

pub use config::{BasePath, Config, CONFIG_FILE};
pub use project::Project;
pub use resolver::PathResolver;
pub use workdir::WorkingDirGuard;
