use std::path::Path;

use anyhow::Result;

use crate::context::Context;

/// Copy the database file to `destination`, or next to itself
pub fn execute(context: &mut Context, destination: Option<&Path>) -> Result<()> {
    let written = match destination {
        Some(path) => {
            context.db().clone_to(path)?;
            path.to_path_buf()
        }
        None => context.db().backup()?,
    };

    println!(
        "{}",
        context
            .formatter()
            .format_success(&format!("Cloned to {}", written.display()))
    );
    Ok(())
}
