use anyhow::Result;

use crate::commands::parse_value;
use crate::context::Context;

/// Append each raw value to the array at `key`
pub fn push(context: &mut Context, key: &str, raw: &[String]) -> Result<()> {
    let values = raw.iter().map(|r| parse_value(r)).collect();
    let array = context.db_mut().push(key, values)?;
    println!("{}", context.formatter().format_value(&array)?);
    Ok(())
}

/// Remove elements equal to `raw` from the array at `key`
pub fn pull_value(context: &mut Context, key: &str, raw: &str) -> Result<()> {
    let target = parse_value(raw);

    match context.db_mut().pull(key, |item| item == &target)? {
        Some(kept) => println!("{}", context.formatter().format_value(&kept.into())?),
        None => println!("{}", context.formatter().format_info(&format!("'{}' is not set", key))),
    }
    Ok(())
}
