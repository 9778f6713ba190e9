//! Splicing rendered fragments back into page source

use crate::domain::scanner::TagOccurrence;
use crate::error::{Result, TableReaderError};

const INDENT_WIDTH: usize = 4;

/// Indentation for a fragment replacing a tag indented by `width` spaces
///
/// Rounded down to a multiple of four so that tags inside lists or content
/// tabs land on a valid markdown indentation level.
pub fn normalized_indent(width: usize) -> String {
    " ".repeat(width / INDENT_WIDTH * INDENT_WIDTH)
}

/// Prefix every non-blank line of `fragment` with `indent`
pub fn indent_fragment(fragment: &str, indent: &str) -> String {
    if indent.is_empty() {
        return fragment.to_string();
    }

    fragment
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace a single occurrence in `source` with `fragment`, re-indented
///
/// `occurrence` must have been scanned from `source` itself.
pub fn apply(source: &str, occurrence: &TagOccurrence, fragment: &str) -> Result<String> {
    let mut substitutor = Substitutor::new(source);
    substitutor.push(occurrence, fragment)?;
    Ok(substitutor.finish())
}

/// Builds the substituted text from one scan's occurrences, in discovery order
///
/// Each fragment is spliced at its occurrence's captured span, so identical
/// tags each receive their own fragment and fragment text is never rescanned.
#[derive(Debug)]
pub struct Substitutor<'a> {
    source: &'a str,
    output: String,
    cursor: usize,
}

impl<'a> Substitutor<'a> {
    pub fn new(source: &'a str) -> Self {
        Substitutor {
            source,
            output: String::with_capacity(source.len()),
            cursor: 0,
        }
    }

    /// Replace `occurrence` with `fragment`
    ///
    /// Occurrences must be pushed in the order they were discovered.
    pub fn push(&mut self, occurrence: &TagOccurrence, fragment: &str) -> Result<()> {
        let span = occurrence.span.clone();
        if span.start < self.cursor {
            return Err(TableReaderError::Substitution(format!(
                "occurrence at byte {} is out of order or overlaps the previous one",
                span.start
            )));
        }
        if self.source.get(span.clone()) != Some(occurrence.matched.as_str()) {
            return Err(TableReaderError::Substitution(format!(
                "source text at bytes {}..{} no longer matches '{}'",
                span.start,
                span.end,
                occurrence.matched.trim()
            )));
        }

        self.output.push_str(&self.source[self.cursor..span.start]);
        let indent = normalized_indent(occurrence.indent_width());
        self.output.push_str(&indent_fragment(fragment, &indent));
        self.cursor = span.end;
        Ok(())
    }

    /// The substituted text, including everything after the last occurrence
    pub fn finish(mut self) -> String {
        self.output.push_str(&self.source[self.cursor..]);
        self.output
    }
}
