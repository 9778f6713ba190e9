//! Domain layer - Tag scanning, argument parsing and substitution

pub mod args;
pub mod registry;
pub mod scanner;
pub mod search_path;
pub mod substitute;
pub mod value;

pub use args::ArgParser;
pub use registry::{ReaderRegistry, TableReader};
pub use scanner::{TagOccurrence, TagScanner};
pub use search_path::SearchPath;
pub use substitute::Substitutor;
pub use value::{ParsedCall, Value};
