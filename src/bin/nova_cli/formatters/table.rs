use anyhow::Result;
use colored::*;
use novadb::core::value::type_name;
use novadb::{Entry, Value};
use prettytable::{Cell, Row, Table};

use crate::formatters::Formatter;

const MAX_CELL: usize = 50;

/// Tabular output
pub struct TableFormatter {
    colored: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        TableFormatter { colored: true }
    }

    pub fn without_colors() -> Self {
        TableFormatter { colored: false }
    }
}

/// Scalars in full (long strings truncated), containers as a placeholder
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_CELL => {
            let head: String = s.chars().take(MAX_CELL - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(map) => format!("{{{} keys}}", map.len()),
        scalar => scalar.to_string(),
    }
}

fn typed_table<'a, I>(header: &str, rows: I) -> Table
where
    I: IntoIterator<Item = (String, &'a Value)>,
{
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new(header),
        Cell::new("Type"),
        Cell::new("Value"),
    ]));

    for (label, value) in rows {
        table.add_row(Row::new(vec![
            Cell::new(&label),
            Cell::new(type_name(value)),
            Cell::new(&cell_text(value)),
        ]));
    }

    table
}

impl Formatter for TableFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        let table = match value {
            Value::Array(items) => {
                typed_table("Index", items.iter().enumerate().map(|(i, v)| (i.to_string(), v)))
            }
            Value::Object(map) => typed_table("Key", map.iter().map(|(k, v)| (k.clone(), v))),
            scalar => {
                let mut table = Table::new();
                table.add_row(Row::new(vec![Cell::new("Type"), Cell::new("Value")]));
                table.add_row(Row::new(vec![
                    Cell::new(type_name(scalar)),
                    Cell::new(&cell_text(scalar)),
                ]));
                table
            }
        };

        Ok(table.to_string())
    }

    fn format_entries(&self, entries: &[Entry]) -> Result<String> {
        let table = typed_table("Key", entries.iter().map(|e| (e.key.clone(), &e.value)));
        Ok(table.to_string())
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }

    fn format_success(&self, success: &str) -> String {
        if self.colored {
            format!("{}", success.green().bold())
        } else {
            format!("Success: {}", success)
        }
    }
}
