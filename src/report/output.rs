//! Output formatting for the spend report.

use super::UserTotal;
use shop_data_gen::csv_escape;
use std::io::Write;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    /// Fixed-width text table (default)
    #[default]
    Table,
    /// JSON array format
    Json,
    /// CSV format
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Valid: table, json, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Render cents as a two-decimal amount
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

const USERNAME_WIDTH: usize = 15;
const EMAIL_WIDTH: usize = 30;
const TOTAL_WIDTH: usize = 12;

/// Formatter for report rows
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format report rows to a string
    pub fn format(rows: &[UserTotal], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(rows),
            OutputFormat::Json => Self::format_json(rows),
            OutputFormat::Csv => Self::format_csv(rows),
        }
    }

    /// Write formatted rows to a writer
    pub fn write<W: Write>(
        rows: &[UserTotal],
        format: OutputFormat,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writer.write_all(Self::format(rows, format).as_bytes())
    }

    /// Header, a separator line, then one fixed-width line per user
    fn format_table(rows: &[UserTotal]) -> String {
        let mut output = format!(
            "{:<uw$} {:<ew$} {:>tw$}\n",
            "Username",
            "Email",
            "Total Spent",
            uw = USERNAME_WIDTH,
            ew = EMAIL_WIDTH,
            tw = TOTAL_WIDTH
        );
        output.push_str(&"-".repeat(USERNAME_WIDTH + EMAIL_WIDTH + TOTAL_WIDTH + 3));
        output.push('\n');

        for row in rows {
            // "$" takes one column of the total's width
            output.push_str(&format!(
                "{:<uw$} {:<ew$} ${:>tw$}\n",
                row.username,
                row.email,
                row.total_spent(),
                uw = USERNAME_WIDTH,
                ew = EMAIL_WIDTH,
                tw = TOTAL_WIDTH - 2
            ));
        }

        output
    }

    /// Format as JSON array. Amounts are the exact decimal string plus the
    /// integer cents; neither goes through a float.
    fn format_json(rows: &[UserTotal]) -> String {
        let values: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "username": row.username,
                    "email": row.email,
                    "total_spent": row.total_spent(),
                    "total_cents": row.total_cents,
                })
            })
            .collect();

        serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
    }

    /// Format as CSV
    fn format_csv(rows: &[UserTotal]) -> String {
        let mut output = String::from("username,email,total_spent\n");
        for row in rows {
            output.push_str(&format!(
                "{},{},{}\n",
                csv_escape(&row.username),
                csv_escape(&row.email),
                row.total_spent()
            ));
        }
        output
    }
}
