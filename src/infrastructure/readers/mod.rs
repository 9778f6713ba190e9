//! Built-in table readers
//!
//! Each reader turns one data file into a markdown fragment. The pipeline
//! hands them calls whose path argument is already resolved to an absolute
//! path.

pub mod delimited;
pub mod json;
pub mod markdown;
pub mod raw;

pub use delimited::DelimitedReader;
pub use json::JsonReader;
pub use raw::RawReader;

use crate::domain::{ParsedCall, ReaderRegistry};
use crate::error::{Result, TableReaderError};
use std::fs;

impl ReaderRegistry {
    /// Registry with every built-in reader, in a fixed order
    pub fn with_builtin_readers() -> Self {
        let mut registry = ReaderRegistry::new();
        registry
            .register("read_csv", DelimitedReader::csv())
            .register("read_table", DelimitedReader::table())
            .register("read_json", JsonReader)
            .register("read_raw", RawReader);
        registry
    }
}

/// The resolved input path of `call`
pub(crate) fn input_path<'a>(reader: &str, call: &'a ParsedCall) -> Result<&'a str> {
    call.path()
        .ok_or_else(|| TableReaderError::render(reader, "missing file path argument"))
}

/// Read the input file of `call` as text
pub(crate) fn read_input(reader: &str, call: &ParsedCall) -> Result<String> {
    let path = input_path(reader, call)?;
    fs::read_to_string(path)
        .map_err(|e| TableReaderError::render(reader, format!("cannot read '{}': {}", path, e)))
}

/// Log keyword arguments `reader` does not understand
pub(crate) fn warn_unknown_keywords(reader: &str, call: &ParsedCall, known: &[&str]) {
    for name in call.keyword.keys() {
        if name != crate::domain::value::PATH_KEYWORD && !known.contains(&name.as_str()) {
            log::warn!("{}: ignoring unsupported argument '{}'", reader, name);
        }
    }
}
