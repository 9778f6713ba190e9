//! JSON reader (`read_json`)

use super::markdown::markdown_table;
use super::{read_input, warn_unknown_keywords};
use crate::domain::{ParsedCall, TableReader};
use crate::error::{Result, TableReaderError};
use serde_json::{Map, Value as Json};

const NAME: &str = "read_json";

/// Reads JSON tables
///
/// `orient="records"` (default) expects an array of objects;
/// `orient="columns"` expects an object mapping column names to arrays.
#[derive(Debug, Clone, Copy)]
pub struct JsonReader;

impl TableReader for JsonReader {
    fn render(&self, call: &ParsedCall) -> Result<String> {
        warn_unknown_keywords(NAME, call, &["orient"]);

        let text = read_input(NAME, call)?;
        let json: Json = serde_json::from_str(&text)
            .map_err(|e| TableReaderError::render(NAME, format!("invalid JSON: {}", e)))?;

        let (headers, rows) = match call.str_keyword("orient").unwrap_or("records") {
            "records" => records_table(&json)?,
            "columns" => columns_table(&json)?,
            other => {
                return Err(TableReaderError::render(
                    NAME,
                    format!("unsupported orient '{}', expected records or columns", other),
                ))
            }
        };

        Ok(markdown_table(&headers, &rows))
    }
}

fn shape_error(expected: &str) -> TableReaderError {
    TableReaderError::render(NAME, format!("expected {}", expected))
}

/// Array of objects; columns appear in order of first use
fn records_table(json: &Json) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let items = json
        .as_array()
        .ok_or_else(|| shape_error("an array of objects"))?;

    let objects: Vec<&Map<String, Json>> = items
        .iter()
        .map(|item| item.as_object().ok_or_else(|| shape_error("an array of objects")))
        .collect::<Result<_>>()?;

    let mut headers: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = objects
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|h| object.get(h).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok((headers, rows))
}

/// Object of equal-or-shorter arrays
fn columns_table(json: &Json) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let object = json
        .as_object()
        .ok_or_else(|| shape_error("an object of arrays"))?;

    let mut headers = Vec::with_capacity(object.len());
    let mut columns = Vec::with_capacity(object.len());
    for (key, value) in object {
        let column = value
            .as_array()
            .ok_or_else(|| shape_error("an object of arrays"))?;
        headers.push(key.clone());
        columns.push(column);
    }

    let height = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    let rows = (0..height)
        .map(|i| {
            columns
                .iter()
                .map(|column| column.get(i).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Ok((headers, rows))
}

fn cell_text(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}
