mod app;
mod commands;
mod context;
mod formatters;
mod repl;
mod utils;

use anyhow::Result;

fn main() -> Result<()> {
    app::run()
}
