use anyhow::Result;
use novadb::Value;

use crate::context::Context;

/// Print the value at `key`
pub fn execute(context: &mut Context, key: &str) -> Result<()> {
    match context.db().get(key)? {
        Some(value) => println!("{}", context.formatter().format_value(&value)?),
        None => println!("{}", context.formatter().format_info(&format!("'{}' is not set", key))),
    }
    Ok(())
}

pub fn has(context: &mut Context, key: &str) -> Result<()> {
    let found = context.db().has(key)?;
    println!("{}", context.formatter().format_value(&Value::Bool(found))?);
    Ok(())
}

pub fn type_of(context: &mut Context, key: &str) -> Result<()> {
    let name = context.db().type_of(key)?;
    println!("{}", context.formatter().format_value(&Value::from(name))?);
    Ok(())
}
