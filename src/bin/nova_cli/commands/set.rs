use anyhow::Result;

use crate::commands::parse_value;
use crate::context::Context;

/// Store `raw` at `key`
pub fn execute(context: &mut Context, key: &str, raw: &str) -> Result<()> {
    let value = context.db_mut().set(key, parse_value(raw))?;
    println!("{}", context.formatter().format_value(&value)?);
    Ok(())
}
