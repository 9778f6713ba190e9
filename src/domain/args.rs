//! Literal-only parsing of tag argument lists
//!
//! Turns the text between the parentheses of a tag such as
//! `{{ read_csv("data.csv", sep=";", header=None) }}` into positional and
//! keyword values. Only literals are recognized: quoted strings, bare path
//! words, integers, floats, booleans, `None`/`null`, and list or tuple
//! literals of those. Nothing is ever evaluated.

use crate::domain::value::{ParsedCall, Value};
use crate::error::{Result, TableReaderError};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn keyword_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?s)^([A-Za-z_][A-Za-z0-9_]*)\s*=(.*)$").unwrap())
}

fn integer_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[+-]?[0-9]+(?:_[0-9]+)*$").unwrap())
}

fn float_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"^[+-]?(?:[0-9]+(?:_[0-9]+)*\.(?:[0-9]+(?:_[0-9]+)*)?|\.[0-9]+(?:_[0-9]+)*|[0-9]+(?:_[0-9]+)*)(?:[eE][+-]?[0-9]+)?$",
        )
        .unwrap()
    })
}

/// Unquoted words made of path characters, e.g. `tables/data.csv`
fn bare_word_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_./\\:~-]+$").unwrap())
}

/// Parser for tag argument lists
pub struct ArgParser;

impl ArgParser {
    /// Parse a raw argument list into a [`ParsedCall`]
    ///
    /// # Errors
    ///
    /// - `ArgSyntax` for anything that is not a literal, for unbalanced quotes
    ///   or brackets, and for positional arguments following keyword ones
    /// - `DuplicateArgument` when a keyword is given twice
    pub fn parse(raw: &str) -> Result<ParsedCall> {
        let mut positional = Vec::new();
        let mut keyword = BTreeMap::new();

        for token in arguments(raw, raw)? {
            if let Some((name, value_text)) = split_keyword(token) {
                let value = parse_literal(value_text.trim(), raw)?;
                if keyword.insert(name.to_string(), value).is_some() {
                    return Err(TableReaderError::DuplicateArgument {
                        name: name.to_string(),
                        raw: raw.to_string(),
                    });
                }
            } else {
                if !keyword.is_empty() {
                    return Err(syntax_error(
                        raw,
                        format!("positional argument '{}' follows keyword argument", token),
                    ));
                }
                positional.push(parse_literal(token, raw)?);
            }
        }

        Ok(ParsedCall::new(positional, keyword))
    }
}

fn syntax_error(raw: &str, message: impl Into<String>) -> TableReaderError {
    TableReaderError::ArgSyntax {
        raw: raw.to_string(),
        message: message.into(),
    }
}

/// Split on commas that are outside quotes and brackets
///
/// Segments are returned untrimmed, including an empty last segment after a
/// trailing comma.
fn split_top_level<'a>(text: &'a str, raw: &str) -> Result<Vec<&'a str>> {
    let mut segments = Vec::new();
    let mut brackets: Vec<char> = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => brackets.push(c),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                if brackets.pop() != Some(expected) {
                    return Err(syntax_error(raw, format!("unbalanced '{}'", c)));
                }
            }
            ',' if brackets.is_empty() => {
                segments.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if quote.is_some() {
        return Err(syntax_error(raw, "unterminated string"));
    }
    if let Some(open) = brackets.last() {
        return Err(syntax_error(raw, format!("unclosed '{}'", open)));
    }

    segments.push(&text[start..]);
    Ok(segments)
}

/// Trimmed, non-empty arguments of a comma-separated list
///
/// A single trailing comma is accepted; an empty list yields no arguments.
fn arguments<'a>(text: &'a str, raw: &str) -> Result<Vec<&'a str>> {
    let mut segments: Vec<&str> = split_top_level(text, raw)?
        .into_iter()
        .map(str::trim)
        .collect();

    if segments.len() == 1 && segments[0].is_empty() {
        return Ok(Vec::new());
    }
    if segments.len() > 1 && segments.last().is_some_and(|s| s.is_empty()) {
        segments.pop();
    }
    if segments.iter().any(|s| s.is_empty()) {
        return Err(syntax_error(raw, "empty argument"));
    }

    Ok(segments)
}

/// Split `name = value` into its parts; `None` for positional arguments
fn split_keyword(token: &str) -> Option<(&str, &str)> {
    let caps = keyword_regex().captures(token)?;
    let name = caps.get(1)?.as_str();
    let value = caps.get(2)?.as_str();
    // `a == b` is a comparison, not a keyword
    if value.starts_with('=') {
        return None;
    }
    Some((name, value))
}

fn parse_literal(token: &str, raw: &str) -> Result<Value> {
    if token.is_empty() {
        return Err(syntax_error(raw, "missing value"));
    }

    let first = token.chars().next().unwrap_or_default();
    match first {
        '[' | '(' => return parse_sequence(token, raw),
        '{' => return Err(syntax_error(raw, "dict literals are not supported")),
        '"' | '\'' => return parse_string(token, false, raw).map(Value::String),
        'r' | 'R' if token[1..].starts_with(|c: char| c == '"' || c == '\'') => {
            return parse_string(&token[1..], true, raw).map(Value::String)
        }
        _ => {}
    }

    if integer_regex().is_match(token) {
        return token
            .replace('_', "")
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| syntax_error(raw, format!("integer '{}' out of range", token)));
    }

    if float_regex().is_match(token) {
        let value = token
            .replace('_', "")
            .parse::<f64>()
            .map_err(|_| syntax_error(raw, format!("invalid number '{}'", token)))?;
        if !value.is_finite() {
            return Err(syntax_error(raw, format!("float '{}' out of range", token)));
        }
        return Ok(Value::Float(value));
    }

    match token.to_ascii_lowercase().as_str() {
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        "none" | "null" => return Ok(Value::Null),
        _ => {}
    }

    if bare_word_regex().is_match(token)
        && token
            .chars()
            .any(|c| c.is_ascii_alphabetic() || c == '_' || c == '/')
    {
        return Ok(Value::String(token.to_string()));
    }

    Err(syntax_error(
        raw,
        format!("unsupported expression '{}'", token),
    ))
}

/// Parse a quoted string; `token` must be exactly one string literal
fn parse_string(token: &str, raw_string: bool, raw: &str) -> Result<String> {
    let mut chars = token.char_indices();
    let quote = match chars.next() {
        Some((_, q)) => q,
        None => return Err(syntax_error(raw, "missing value")),
    };

    let mut out = String::new();
    while let Some((i, c)) = chars.next() {
        if c == quote {
            let rest = &token[i + c.len_utf8()..];
            if !rest.trim().is_empty() {
                return Err(syntax_error(
                    raw,
                    format!("unexpected '{}' after string", rest.trim()),
                ));
            }
            return Ok(out);
        }
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some((_, next)) = chars.next() else {
            break;
        };
        if raw_string {
            out.push('\\');
            out.push(next);
            continue;
        }
        match next {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Err(syntax_error(raw, "unterminated string"))
}

/// Parse `[a, b]` or `(a, b)`; `(a)` is just `a`
fn parse_sequence(token: &str, raw: &str) -> Result<Value> {
    let open = token.chars().next().unwrap_or_default();
    let close = if open == '[' { ']' } else { ')' };
    if !token.ends_with(close) {
        return Err(syntax_error(
            raw,
            format!("unexpected text after '{}...{}'", open, close),
        ));
    }

    let inner = &token[1..token.len() - 1];
    // Reject `(a) + (b)` style tokens whose brackets close early
    let segments = split_top_level(inner, raw)?;
    let items = arguments(inner, raw)?;

    if open == '(' && segments.len() == 1 && items.len() == 1 {
        return parse_literal(items[0], raw);
    }

    let values = items
        .into_iter()
        .map(|item| parse_literal(item, raw))
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::List(values))
}
