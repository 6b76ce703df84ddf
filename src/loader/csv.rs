//! Minimal RFC 4180 CSV reader for the generated input files.

use std::collections::HashMap;

/// One data row keyed by header name. Fields missing from a short row are
/// absent from the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRecord {
    fields: HashMap<String, String>,
}

impl CsvRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|s| s.as_str())
    }
}

/// Parsed file: header row plus data rows
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub records: Vec<CsvRecord>,
}

/// Split CSV text into rows of raw fields.
///
/// Quoted fields may contain commas, doubled quotes and line breaks.
/// Both `\n` and `\r\n` terminate a row; blank lines are skipped.
pub fn parse_rows(input: &str) -> Result<Vec<Vec<String>>, String> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut chars = input.chars().peekable();

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
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                finish_row(&mut rows, &mut row, &mut field);
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(format!("unterminated quoted field (line {})", line));
    }
    finish_row(&mut rows, &mut row, &mut field);
    Ok(rows)
}

fn finish_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, field: &mut String) {
    if row.is_empty() && field.is_empty() {
        return;
    }
    row.push(std::mem::take(field));
    rows.push(std::mem::take(row));
}

/// Parse CSV text with a header row into keyed records
pub fn parse_table(input: &str) -> Result<CsvTable, String> {
    let mut rows = parse_rows(input.strip_prefix('\u{feff}').unwrap_or(input))?.into_iter();

    let Some(header) = rows.next() else {
        return Ok(CsvTable::default());
    };
    let header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();

    let records = rows
        .map(|values| CsvRecord {
            fields: header.iter().cloned().zip(values).collect(),
        })
        .collect();

    Ok(CsvTable { header, records })
}
