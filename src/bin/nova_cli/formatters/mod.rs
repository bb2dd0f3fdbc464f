pub mod formatter;
pub mod text;
pub mod json;
pub mod table;

pub use formatter::Formatter;
use clap::ValueEnum;

/// Available output formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl OutputFormat {
    /// Case-insensitive lookup by name, for the REPL's `.format`
    pub fn parse(name: &str) -> Option<Self> {
        <OutputFormat as ValueEnum>::from_str(name, true).ok()
    }
}
