//! Delimited text readers (`read_csv`, `read_table`)

use super::markdown::markdown_table;
use super::{read_input, warn_unknown_keywords};
use crate::domain::{ParsedCall, TableReader, Value};
use crate::error::{Result, TableReaderError};

const KNOWN_KEYWORDS: &[&str] = &["sep", "header", "names", "usecols", "nrows", "skiprows"];

/// Reads delimiter-separated files into markdown tables
///
/// Supported arguments: `sep`, `header` (row number or `None`), `names`,
/// `usecols` (indices or column names), `nrows` and `skiprows`.
#[derive(Debug, Clone)]
pub struct DelimitedReader {
    name: &'static str,
    default_sep: char,
}

impl DelimitedReader {
    pub fn csv() -> Self {
        DelimitedReader {
            name: "read_csv",
            default_sep: ',',
        }
    }

    pub fn table() -> Self {
        DelimitedReader {
            name: "read_table",
            default_sep: '\t',
        }
    }

    fn error(&self, message: impl Into<String>) -> TableReaderError {
        TableReaderError::render(self.name, message)
    }

    fn separator(&self, call: &ParsedCall) -> Result<char> {
        let Some(value) = call.keyword("sep") else {
            return Ok(self.default_sep);
        };
        let sep = value
            .as_str()
            .ok_or_else(|| self.error(format!("sep must be a string, got {}", value.kind())))?;
        let mut chars = sep.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(self.error(format!(
                "sep must be a single character, got '{}'",
                sep
            ))),
        }
    }

    fn non_negative(&self, call: &ParsedCall, name: &str) -> Result<Option<usize>> {
        match call.keyword(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Integer(n)) if *n >= 0 => Ok(Some(*n as usize)),
            Some(other) => Err(self.error(format!(
                "{} must be a non-negative integer, got {}",
                name, other
            ))),
        }
    }

    /// Index of the header row, or `None` when the file has no header
    fn header_row(&self, call: &ParsedCall) -> Result<Option<usize>> {
        match call.keyword("header") {
            // Explicit names replace the header unless a header row is requested
            None if call.keyword("names").is_some() => Ok(None),
            None => Ok(Some(0)),
            Some(_) => self.non_negative(call, "header"),
        }
    }

    fn names(&self, call: &ParsedCall) -> Result<Option<Vec<String>>> {
        match call.keyword("names") {
            None | Some(Value::Null) => Ok(None),
            Some(Value::List(items)) => Ok(Some(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            Some(other) => Err(self.error(format!("names must be a list, got {}", other.kind()))),
        }
    }

    /// Column indices selected by `usecols`, in file order
    fn selected_columns(&self, call: &ParsedCall, headers: &[String]) -> Result<Option<Vec<usize>>> {
        let items = match call.keyword("usecols") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::List(items)) => items,
            Some(other) => {
                return Err(self.error(format!("usecols must be a list, got {}", other.kind())))
            }
        };

        let mut indices = Vec::with_capacity(items.len());
        for item in items {
            let index = match item {
                Value::Integer(i) if *i >= 0 && (*i as usize) < headers.len() => *i as usize,
                Value::String(name) => headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| self.error(format!("usecols: no column named '{}'", name)))?,
                other => {
                    return Err(self.error(format!("usecols: invalid column {}", other)));
                }
            };
            indices.push(index);
        }
        indices.sort_unstable();
        indices.dedup();
        Ok(Some(indices))
    }
}

impl TableReader for DelimitedReader {
    fn render(&self, call: &ParsedCall) -> Result<String> {
        warn_unknown_keywords(self.name, call, KNOWN_KEYWORDS);

        let sep = self.separator(call)?;
        let text = read_input(self.name, call)?;
        let mut records = parse_delimited(&text, sep).map_err(|e| self.error(e))?;

        let skip = self.non_negative(call, "skiprows")?.unwrap_or(0);
        records.drain(..skip.min(records.len()));

        let width = records.iter().map(Vec::len).max().unwrap_or(0);
        let mut headers = match self.header_row(call)? {
            Some(row) => {
                if row >= records.len() {
                    return Err(self.error(format!(
                        "header row {} is past the end of the file",
                        row
                    )));
                }
                let header = records[row].clone();
                records.drain(..=row);
                header
            }
            None => (0..width).map(|i| i.to_string()).collect(),
        };
        if let Some(names) = self.names(call)? {
            headers = names;
        }

        if let Some(limit) = self.non_negative(call, "nrows")? {
            records.truncate(limit);
        }

        if let Some(columns) = self.selected_columns(call, &headers)? {
            let pick = |row: &[String]| -> Vec<String> {
                columns
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or_default())
                    .collect()
            };
            headers = pick(&headers);
            records = records.iter().map(|r| pick(r)).collect();
        }

        Ok(markdown_table(&headers, &records))
    }
}

/// Split delimited text into records of fields
///
/// Handles double-quoted fields (with `""` escapes and embedded separators or
/// newlines), `\r\n` line endings, and skips blank lines.
pub fn parse_delimited(text: &str, sep: char) -> std::result::Result<Vec<Vec<String>>, String> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                if field_started || !record.is_empty() {
                    record.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut record));
                }
                field_started = false;
            }
            c if c == sep => {
                record.push(std::mem::take(&mut field));
                field_started = false;
            }
            _ => {
                field.push(c);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(format!("unterminated quoted field at line {}", line));
    }
    if field_started || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}
