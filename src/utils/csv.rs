//! Minimal RFC 4180 table codec for the `original,simplified` corpus files.

use std::fmt::Write as _;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CsvError {
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: unexpected character after closing quote")]
    TrailingAfterQuote { line: usize },
}

impl CsvError {
    pub fn line(&self) -> usize {
        match self {
            CsvError::UnterminatedQuote { line } | CsvError::TrailingAfterQuote { line } => *line,
        }
    }
}

/// Quotes a field when it contains a delimiter, quote or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders a header and rows, one line per row, `\n` terminated.
pub fn render<R, F>(header: &[&str], rows: R) -> String
where
    R: IntoIterator<Item = F>,
    F: IntoIterator,
    F::Item: AsRef<str>,
{
    let mut out = String::new();
    let _ = writeln!(out, "{}", header.join(","));
    for row in rows {
        let fields: Vec<String> = row
            .into_iter()
            .map(|f| escape_field(f.as_ref()))
            .collect();
        let _ = writeln!(out, "{}", fields.join(","));
    }
    out
}

/// A parsed row together with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// Parses CSV text into rows. Blank lines between rows are skipped.
pub fn parse(input: &str) -> Result<Vec<CsvRow>, CsvError> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut chars = input.chars().peekable();

    let mut line = 1;
    let mut row_start = 1;
    // A row has content once any character of it was consumed.
    let mut row_has_content = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if field.is_empty() => {
                row_has_content = true;
                let quote_line = line;
                loop {
                    match chars.next() {
                        Some('"') => {
                            if chars.peek() == Some(&'"') {
                                chars.next();
                                field.push('"');
                            } else {
                                break;
                            }
                        }
                        Some(ch) => {
                            if ch == '\n' {
                                line += 1;
                            }
                            field.push(ch);
                        }
                        None => return Err(CsvError::UnterminatedQuote { line: quote_line }),
                    }
                }
                match chars.peek() {
                    None | Some(',') | Some('\n') | Some('\r') => {}
                    Some(_) => return Err(CsvError::TrailingAfterQuote { line }),
                }
            }
            ',' => {
                row_has_content = true;
                fields.push(std::mem::take(&mut field));
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if row_has_content {
                    fields.push(std::mem::take(&mut field));
                    rows.push(CsvRow {
                        line: row_start,
                        fields: std::mem::take(&mut fields),
                    });
                }
                row_has_content = false;
                line += 1;
                row_start = line;
            }
            other => {
                row_has_content = true;
                field.push(other);
            }
        }
    }

    if row_has_content {
        fields.push(field);
        rows.push(CsvRow { line: row_start, fields });
    }

    Ok(rows)
}
