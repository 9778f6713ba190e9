//! Verbatim file inclusion (`read_raw`)

use super::{read_input, warn_unknown_keywords};
use crate::domain::{ParsedCall, TableReader};
use crate::error::Result;

/// Inserts the file contents unchanged, minus trailing newlines
#[derive(Debug, Clone, Copy)]
pub struct RawReader;

impl TableReader for RawReader {
    fn render(&self, call: &ParsedCall) -> Result<String> {
        warn_unknown_keywords("read_raw", call, &[]);
        let text = read_input("read_raw", call)?;
        Ok(text.trim_end_matches(['\r', '\n']).to_string())
    }
}
