//! Literal values and parsed tag calls

use std::collections::BTreeMap;
use std::fmt;

/// Keyword under which readers accept the input file path
pub const PATH_KEYWORD: &str = "filepath_or_buffer";

/// A literal argument value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
    /// List or tuple literal
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the value's kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Null => "None",
            Value::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => {
                f.write_str("\"")?;
                for c in s.chars() {
                    match c {
                        '\\' => f.write_str("\\\\")?,
                        '"' => f.write_str("\\\"")?,
                        '\n' => f.write_str("\\n")?,
                        '\t' => f.write_str("\\t")?,
                        '\r' => f.write_str("\\r")?,
                        _ => write!(f, "{}", c)?,
                    }
                }
                f.write_str("\"")
            }
            Value::Integer(i) => write!(f, "{}", i),
            // Debug formatting keeps the fraction ("1.0") and round-trips exactly
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Boolean(true) => f.write_str("True"),
            Value::Boolean(false) => f.write_str("False"),
            Value::Null => f.write_str("None"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Positional and keyword arguments parsed from one tag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedCall {
    pub positional: Vec<Value>,
    pub keyword: BTreeMap<String, Value>,
}

impl ParsedCall {
    pub fn new(positional: Vec<Value>, keyword: BTreeMap<String, Value>) -> Self {
        ParsedCall {
            positional,
            keyword,
        }
    }

    pub fn first_positional(&self) -> Option<&Value> {
        self.positional.first()
    }

    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keyword.get(name)
    }

    /// String keyword value; `None` when absent or not a string
    pub fn str_keyword(&self, name: &str) -> Option<&str> {
        self.keyword(name).and_then(Value::as_str)
    }

    /// Integer keyword value; `None` when absent or not an integer
    pub fn int_keyword(&self, name: &str) -> Option<i64> {
        self.keyword(name).and_then(Value::as_int)
    }

    /// The argument naming the input file: positional 0, else `filepath_or_buffer`
    pub fn path_argument(&self) -> Option<&Value> {
        self.first_positional().or_else(|| self.keyword(PATH_KEYWORD))
    }

    /// The input file path as a string, if the call has one
    pub fn path(&self) -> Option<&str> {
        self.path_argument().and_then(Value::as_str)
    }

    /// Copy of this call with the path argument replaced by `path`
    ///
    /// The slot rewritten is the one `path_argument` reads from. A call without
    /// a path argument is returned unchanged.
    pub fn with_path(&self, path: &str) -> ParsedCall {
        let mut call = self.clone();
        if let Some(first) = call.positional.first_mut() {
            *first = Value::String(path.to_string());
        } else if let Some(value) = call.keyword.get_mut(PATH_KEYWORD) {
            *value = Value::String(path.to_string());
        }
        call
    }
}

impl fmt::Display for ParsedCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
            first = false;
        }
        for (name, value) in &self.keyword {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", name, value)?;
            first = false;
        }
        Ok(())
    }
}
