//! CSV reading for spreadsheet exports.
//!
//! Spreadsheet CSV exports are small and regular, so a quote-aware line
//! splitter is enough. Headers are always the first row.

use std::mem::take;

/// Split CSV text into rows of fields. Handles quoted fields, doubled
/// quotes, CRLF line endings and a leading byte-order mark. Fully blank
/// lines are dropped.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut field = String::new();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) {
                    chars.next();
                }
                row.push(take(&mut field));
                push_row(&mut rows, take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing row without newline, even with unterminated quotes.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|cell| !cell.trim().is_empty()) {
        rows.push(row);
    }
}

/// Normalize a header for lookup: trim and uppercase.
pub fn normalize_header(name: &str) -> String {
    name.trim().to_uppercase()
}

/// A parsed sheet: header row plus data rows
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn parse(text: &str) -> Self {
        let mut rows = parse_rows(text);
        if rows.is_empty() {
            return Self::default();
        }
        let headers = rows.remove(0);
        Self { headers, rows }
    }

    /// Index of the column whose normalized header equals `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = normalize_header(name);
        self.headers
            .iter()
            .position(|h| normalize_header(h) == wanted)
    }

    /// Trimmed cell value; missing cells read as empty.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(|c| c.trim())
            .unwrap_or("")
    }

    /// Non-blank values of `column`, deduplicated, first occurrence order.
    pub fn unique_values(&self, column: usize) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for row in 0..self.rows.len() {
            let value = self.cell(row, column);
            if !value.is_empty() && !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_quotes_and_crlf() {
        let text = "A,B\r\n\"x, y\",\"say \"\"hi\"\"\"\r\nlast,row";
        let rows = parse_rows(text);
        assert_eq!(
            rows,
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["x, y".to_string(), "say \"hi\"".to_string()],
                vec!["last".to_string(), "row".to_string()],
            ]
        );
    }

    #[test]
    fn test_parse_rows_skips_blank_lines_and_bom() {
        let text = "\u{feff}NOMBRE\n\n , \nMerluza\n";
        let rows = parse_rows(text);
        assert_eq!(
            rows,
            vec![vec!["NOMBRE".to_string()], vec!["Merluza".to_string()]]
        );
    }

    #[test]
    fn test_parse_rows_multiline_quoted_field() {
        let rows = parse_rows("A\n\"line one\nline two\"\n");
        assert_eq!(rows[1], vec!["line one\nline two".to_string()]);
    }

    #[test]
    fn test_column_lookup_is_normalized() {
        let table = CsvTable::parse(" contiene ,Puede_Contener\nPESCADO,MOLUSCOS\n");
        assert_eq!(table.column("CONTIENE"), Some(0));
        assert_eq!(table.column("puede_contener"), Some(1));
        assert_eq!(table.column("OTRA"), None);
    }

    #[test]
    fn test_unique_values_drop_blanks_keep_order() {
        let table = CsvTable::parse("ZONA,X\nFAO 27,1\n,2\nFAO 34,3\nFAO 27,4\n");
        assert_eq!(table.unique_values(0), vec!["FAO 27", "FAO 34"]);
    }

    #[test]
    fn test_cell_out_of_range_is_empty() {
        let table = CsvTable::parse("A,B\nonly\n");
        assert_eq!(table.cell(0, 0), "only");
        assert_eq!(table.cell(0, 1), "");
        assert_eq!(table.cell(5, 0), "");
    }
}
