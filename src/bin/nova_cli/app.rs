use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use novadb::{CodecKind, DatabaseOptions};

use crate::commands;
use crate::context::Context;
use crate::formatters::OutputFormat;
use crate::repl::Repl;

#[derive(Parser)]
#[command(name = "novadb")]
#[command(about = "Command line client for novadb files", long_about = None)]
struct Cli {
    /// Verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Directory holding the database, or the database file itself
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Database file name without extension
    #[arg(short, long)]
    name: Option<String>,

    /// File format (json, yaml, toml, bson, json5, hjson, ini, csv)
    #[arg(short, long, value_parser = parse_format)]
    format: Option<CodecKind>,

    /// Options file (.json or .toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a key
    Get { key: String },

    /// Store a value (parsed as JSON, otherwise kept as a string)
    Set { key: String, value: String },

    /// Delete a key
    Del { key: String },

    /// Check whether a key exists
    Has { key: String },

    /// Append values to the array at a key
    Push {
        key: String,
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Remove every element equal to a value from the array at a key
    PullValue { key: String, value: String },

    /// Apply + - * / % ** to the number at a key
    Math {
        key: String,
        operator: String,
        #[arg(allow_negative_numbers = true)]
        operand: f64,
        /// Keep negative results instead of clamping to 0
        #[arg(long)]
        allow_negative: bool,
    },

    /// List top-level pairs
    List {
        /// Show at most this many pairs (0 for all)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,
    },

    /// Print the type of the value at a key
    Type { key: String },

    /// Copy the database file (defaults to <name>-clone.<ext>)
    Clone { destination: Option<PathBuf> },

    /// Interactive mode
    Repl,
}

fn parse_format(s: &str) -> std::result::Result<CodecKind, String> {
    s.parse().map_err(|e: novadb::StoreError| e.to_string())
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// Flags override the options file, which overrides defaults
fn options(cli: &Cli) -> Result<DatabaseOptions> {
    let mut options = match &cli.config {
        Some(file) => DatabaseOptions::from_file(file)?,
        None => DatabaseOptions::default(),
    };

    if let Some(path) = &cli.path {
        options.path = Some(path.clone());
    }
    if let Some(name) = &cli.name {
        options.name = name.clone();
    }
    if let Some(format) = cli.format {
        options.format = format;
    }

    Ok(options)
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let options = options(&cli)?;
    debug!("Opening database with {:?}", options);
    let mut context = Context::new(options, cli.output)?;

    match cli.command {
        Some(Commands::Get { key }) => commands::get::execute(&mut context, &key)?,
        Some(Commands::Set { key, value }) => commands::set::execute(&mut context, &key, &value)?,
        Some(Commands::Del { key }) => commands::del::execute(&mut context, &key)?,
        Some(Commands::Has { key }) => commands::get::has(&mut context, &key)?,
        Some(Commands::Push { key, values }) => {
            commands::array::push(&mut context, &key, &values)?
        }
        Some(Commands::PullValue { key, value }) => {
            commands::array::pull_value(&mut context, &key, &value)?
        }
        Some(Commands::Math {
            key,
            operator,
            operand,
            allow_negative,
        }) => commands::math::execute(&mut context, &key, &operator, operand, allow_negative)?,
        Some(Commands::List { limit }) => commands::list::execute(&mut context, limit)?,
        Some(Commands::Type { key }) => commands::get::type_of(&mut context, &key)?,
        Some(Commands::Clone { destination }) => {
            commands::clone::execute(&mut context, destination.as_deref())?
        }
        Some(Commands::Repl) | None => {
            let mut repl = Repl::new(context)?;
            repl.run()?;
        }
    }

    Ok(())
}
