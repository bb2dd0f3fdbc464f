use anyhow::Result;

use crate::context::Context;

pub fn execute(context: &mut Context, key: &str) -> Result<()> {
    let message = if context.db_mut().del(key)? {
        context.formatter().format_success(&format!("Deleted '{}'", key))
    } else {
        context.formatter().format_info(&format!("Nothing to delete at '{}'", key))
    };
    println!("{}", message);
    Ok(())
}
