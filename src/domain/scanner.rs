//! Locating table tags in page source

use regex::Regex;
use std::ops::Range;

/// One appearance of a tag such as `{{ read_csv("a.csv") }}` in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence {
    /// Tag name as registered (not as written)
    pub tag: String,
    /// Run of spaces directly before `{{`
    pub leading_whitespace: String,
    /// Text between the call parentheses
    pub raw_args: String,
    /// Full matched text, leading whitespace included
    pub matched: String,
    /// Byte range of `matched` in the scanned text
    pub span: Range<usize>,
}

impl TagOccurrence {
    pub fn indent_width(&self) -> usize {
        self.leading_whitespace.len()
    }
}

/// Scanner for the occurrences of one tag name
#[derive(Debug, Clone)]
pub struct TagScanner {
    tag: String,
    pattern: Regex,
}

impl TagScanner {
    /// Build a scanner for `tag`, matched case-insensitively
    pub fn new(tag: &str) -> Self {
        // Escaped tag names always form a valid pattern
        let pattern = Regex::new(&format!(
            r"(?i)( *)\{{\{{\s+{}\((.+?)\)\s+\}}\}}",
            regex::escape(tag)
        ))
        .unwrap();

        TagScanner {
            tag: tag.to_string(),
            pattern,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// All occurrences in `source`, in order of appearance
    pub fn scan(&self, source: &str) -> Vec<TagOccurrence> {
        self.pattern
            .captures_iter(source)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some(TagOccurrence {
                    tag: self.tag.clone(),
                    leading_whitespace: caps.get(1)?.as_str().to_string(),
                    raw_args: caps.get(2)?.as_str().to_string(),
                    matched: whole.as_str().to_string(),
                    span: whole.range(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_single_tag() {
        let source = "# Title\n\n{{ read_csv(\"data.csv\") }}\n\nText";
        let found = TagScanner::new("read_csv").scan(source);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_args, "\"data.csv\"");
        assert_eq!(found[0].leading_whitespace, "");
        assert_eq!(&source[found[0].span.clone()], "{{ read_csv(\"data.csv\") }}");
    }

    #[test]
    fn test_scan_captures_leading_spaces() {
        let source = "- item\n      {{ read_csv(a.csv, sep=';') }}\n";
        let found = TagScanner::new("read_csv").scan(source);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].indent_width(), 6);
        assert_eq!(found[0].raw_args, "a.csv, sep=';'");
        assert!(found[0].matched.starts_with("      {{"));
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let source = "{{ READ_CSV(a.csv) }}\n{{ Read_Csv(b.csv) }}";
        let found = TagScanner::new("read_csv").scan(source);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].tag, "read_csv");
        assert_eq!(found[1].raw_args, "b.csv");
    }

    #[test]
    fn test_scan_preserves_order_and_duplicates() {
        let source = "{{ read_csv(a.csv) }}\ntext\n{{ read_csv(a.csv) }}\n{{ read_csv(b.csv) }}";
        let found = TagScanner::new("read_csv").scan(source);

        let args: Vec<&str> = found.iter().map(|o| o.raw_args.as_str()).collect();
        assert_eq!(args, vec!["a.csv", "a.csv", "b.csv"]);
        assert!(found[0].span.end <= found[1].span.start);
        assert!(found[1].span.end <= found[2].span.start);
    }

    #[test]
    fn test_two_tags_on_one_line_stay_separate() {
        let source = "{{ read_csv(a.csv) }} and {{ read_csv(b.csv) }}";
        let found = TagScanner::new("read_csv").scan(source);

        assert_eq!(found.len(), 2);
        assert_eq!(found[0].raw_args, "a.csv");
        assert_eq!(found[1].raw_args, "b.csv");
    }

    #[test]
    fn test_scan_ignores_other_tags_and_malformed() {
        let source = "{{ read_excel(a.xlsx) }}\n{{read_csv(a.csv)}}\n{{ read_csv() }}\n{{ read_csv(a.csv\n) }}";
        let found = TagScanner::new("read_csv").scan(source);
        assert!(found.is_empty());
    }

    #[test]
    fn test_tag_name_is_escaped() {
        let source = "{{ read.csv(a) }}\n{{ readXcsv(b) }}";
        let found = TagScanner::new("read.csv").scan(source);

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_args, "a");
    }
}
