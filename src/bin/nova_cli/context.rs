use anyhow::Result;
use novadb::{Database, DatabaseOptions};

use crate::formatters::json::JsonFormatter;
use crate::formatters::table::TableFormatter;
use crate::formatters::text::TextFormatter;
use crate::formatters::{Formatter, OutputFormat};

/// Execution context shared by every command
pub struct Context {
    db: Database,
    format: OutputFormat,
    formatter: Box<dyn Formatter>,
}

fn formatter_for(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new()),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Table => Box::new(TableFormatter::new()),
    }
}

impl Context {
    /// Open the database and pick the formatter
    pub fn new(options: DatabaseOptions, format: OutputFormat) -> Result<Self> {
        let db = Database::open(options)?;

        Ok(Context {
            db,
            format,
            formatter: formatter_for(format),
        })
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut Database {
        &mut self.db
    }

    pub fn formatter(&self) -> &dyn Formatter {
        self.formatter.as_ref()
    }

    pub fn set_format(&mut self, format: OutputFormat) {
        if format != self.format {
            self.format = format;
            self.formatter = formatter_for(format);
        }
    }
}
