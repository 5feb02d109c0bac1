//! Table formatting and output utilities
//!
//! This module renders command results as styled tables or JSON.

use crate::error::Result;
use clap::ValueEnum;
use crossterm::terminal::size;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Color, Modify, Padding, Style, Width},
    Table, Tabled,
};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Table formatter with color support
pub struct TableFormatter {
    format: OutputFormat,
    no_color: bool,
}

impl TableFormatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    /// Render rows in the configured format
    pub fn format_table<T: Tabled + Serialize>(&self, data: &[T]) -> Result<String> {
        if data.is_empty() {
            return Ok("No data to display".to_string());
        }

        match self.format {
            OutputFormat::Table => Ok(self.format_as_table(data)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        }
    }

    fn format_as_table<T: Tabled>(&self, data: &[T]) -> String {
        let mut table = Table::new(data);

        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()))
            .with(Padding::new(1, 1, 0, 0));

        if !self.no_color {
            table.with(Modify::new(Rows::first()).with(Color::FG_BLUE));
        }

        // Auto-adjust width to terminal
        if let Ok((width, _)) = size() {
            table.with(Width::wrap(width as usize));
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled, Serialize)]
    struct Row {
        #[tabled(rename = "Setting")]
        setting: String,
        #[tabled(rename = "Value")]
        value: String,
    }

    fn rows() -> Vec<Row> {
        vec![Row {
            setting: "address".to_string(),
            value: "https://127.0.0.1:8200".to_string(),
        }]
    }

    #[test]
    fn test_table_output_contains_values() {
        let formatter = TableFormatter::new(OutputFormat::Table, true);
        let rendered = formatter.format_table(&rows()).unwrap();
        assert!(rendered.contains("Setting"));
        assert!(rendered.contains("address"));
    }

    #[test]
    fn test_json_output() {
        let formatter = TableFormatter::new(OutputFormat::Json, true);
        let rendered = formatter.format_table(&rows()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed[0]["setting"], "address");
    }

    #[test]
    fn test_empty_data() {
        let formatter = TableFormatter::new(OutputFormat::Table, true);
        let empty: Vec<Row> = Vec::new();
        assert_eq!(formatter.format_table(&empty).unwrap(), "No data to display");
    }
}
