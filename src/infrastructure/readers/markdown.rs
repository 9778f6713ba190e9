//! Markdown pipe table rendering

/// Render `headers` and `rows` as a markdown pipe table
///
/// Columns whose cells are all numeric are right-aligned. Short rows are
/// padded with empty cells; pipes inside cells are escaped.
pub fn markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let columns = rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(headers.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    let cell = |row: &[String], i: usize| -> String {
        row.get(i)
            .map(|c| c.replace('|', "\\|").replace('\n', " "))
            .unwrap_or_default()
    };

    let header_cells: Vec<String> = (0..columns).map(|i| cell(headers, i)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| (0..columns).map(|i| cell(row, i)).collect())
        .collect();

    let mut widths: Vec<usize> = header_cells.iter().map(|c| c.chars().count().max(3)).collect();
    for row in &body {
        for (i, c) in row.iter().enumerate() {
            widths[i] = widths[i].max(c.chars().count());
        }
    }

    let numeric: Vec<bool> = (0..columns)
        .map(|i| {
            !body.is_empty()
                && body
                    .iter()
                    .all(|row| row[i].is_empty() || row[i].trim().parse::<f64>().is_ok())
        })
        .collect();

    let mut out = String::new();
    push_row(&mut out, &header_cells, &widths, &numeric);

    out.push('|');
    for (i, width) in widths.iter().enumerate() {
        if numeric[i] {
            out.push_str(&format!("{}:|", "-".repeat(width + 1)));
        } else {
            out.push_str(&format!(":{}|", "-".repeat(width + 1)));
        }
    }
    out.push('\n');

    for row in &body {
        push_row(&mut out, row, &widths, &numeric);
    }

    // No trailing newline: the fragment replaces the tag text in place
    out.pop();
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize], numeric: &[bool]) {
    out.push('|');
    for (i, c) in cells.iter().enumerate() {
        let pad = widths[i] - c.chars().count();
        if numeric[i] {
            out.push_str(&format!(" {}{} |", " ".repeat(pad), c));
        } else {
            out.push_str(&format!(" {}{} |", c, " ".repeat(pad)));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_simple_table() {
        let table = markdown_table(
            &strings(&["name", "n"]),
            &[strings(&["apple", "3"]), strings(&["kiwi", "12"])],
        );
        assert_eq!(
            table,
            "| name  |   n |\n\
             |:------|----:|\n\
             | apple |   3 |\n\
             | kiwi  |  12 |"
        );
    }

    #[test]
    fn test_pipes_are_escaped_and_rows_padded() {
        let table = markdown_table(&strings(&["a", "b"]), &[strings(&["x|y"])]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("x\\|y"));
        assert_eq!(lines[2].matches(" |").count(), 2);
    }

    #[test]
    fn test_header_only() {
        let table = markdown_table(&strings(&["a"]), &[]);
        assert_eq!(table, "| a   |\n|:----|");
    }

    #[test]
    fn test_empty() {
        assert_eq!(markdown_table(&[], &[]), "");
    }
}
