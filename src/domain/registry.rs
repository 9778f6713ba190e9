//! Table reader registry
//!
//! Maps tag names (`read_csv`, `read_json`, ...) to the readers that render
//! them. Readers are looked up by tag name and run in registration order.

use crate::domain::value::ParsedCall;
use crate::error::Result;

/// Renders a parsed tag call into a text fragment
pub trait TableReader {
    /// Produce the fragment for `call`, whose path argument is already absolute
    fn render(&self, call: &ParsedCall) -> Result<String>;

    /// Whether the reader resolves further relative paths against the working
    /// directory, and so must run with it set to the project base directory
    fn requires_working_dir(&self) -> bool {
        false
    }
}

impl<F> TableReader for F
where
    F: Fn(&ParsedCall) -> Result<String>,
{
    fn render(&self, call: &ParsedCall) -> Result<String> {
        self(call)
    }
}

/// Ordered table of tag name to reader
#[derive(Default)]
pub struct ReaderRegistry {
    readers: Vec<(String, Box<dyn TableReader>)>,
}

impl ReaderRegistry {
    pub fn new() -> Self {
        ReaderRegistry::default()
    }

    /// Register `reader` under `name`, replacing an existing entry in place
    pub fn register(&mut self, name: &str, reader: impl TableReader + 'static) -> &mut Self {
        let reader: Box<dyn TableReader> = Box::new(reader);
        match self
            .readers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = reader,
            None => self.readers.push((name.to_string(), reader)),
        }
        self
    }

    /// Reader for `name`, compared case-insensitively like tags themselves
    pub fn get(&self, name: &str) -> Option<&dyn TableReader> {
        self.readers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, reader)| reader.as_ref())
    }

    /// Registered tag names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.readers.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn TableReader)> {
        self.readers
            .iter()
            .map(|(name, reader)| (name.as_str(), reader.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.readers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readers.is_empty()
    }
}

impl std::fmt::Debug for ReaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderRegistry")
            .field("readers", &self.names())
            .finish()
    }
}
