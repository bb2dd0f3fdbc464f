use anyhow::Result;
use novadb::Value;

use crate::context::Context;

/// Print top-level pairs, at most `limit` of them when non-zero
pub fn execute(context: &mut Context, limit: usize) -> Result<()> {
    let entries = context.db().all(limit);

    if entries.is_empty() {
        println!("{}", context.formatter().format_info("The database is empty"));
    } else {
        println!("{}", context.formatter().format_entries(&entries)?);
    }
    Ok(())
}

pub fn keys(context: &mut Context) -> Result<()> {
    let keys: Vec<Value> = context.db().keys().into_iter().map(Value::from).collect();
    println!("{}", context.formatter().format_value(&Value::Array(keys))?);
    Ok(())
}
