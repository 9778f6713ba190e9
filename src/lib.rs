//! table-reader - Inline table tags for markdown documentation
//!
//! Replaces tags such as `{{ read_csv('tables/fruit.csv') }}` in markdown
//! pages with rendered tables. Tag arguments are parsed as literals only,
//! table paths are resolved against an ordered list of search directories,
//! and multi-line output keeps the indentation of the tag it replaces.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::TableReaderError;
