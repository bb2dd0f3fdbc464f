pub mod get;
pub mod set;
pub mod del;
pub mod array;
pub mod math;
pub mod list;
pub mod clone;

use std::path::Path;

use anyhow::Result;
use novadb::Value;

use crate::context::Context;
use crate::utils::error::CliError;

/// Parse a command line value as JSON, falling back to a plain string
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn usage(text: &str) -> anyhow::Error {
    CliError::Usage(text.to_string()).into()
}

/// Run one REPL line such as `set users.alice {"age": 30}`
pub fn dispatch(context: &mut Context, line: &str) -> Result<()> {
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match verb {
        "get" => match args.as_slice() {
            [key] => get::execute(context, key),
            _ => Err(usage("get <key>")),
        },
        "has" => match args.as_slice() {
            [key] => get::has(context, key),
            _ => Err(usage("has <key>")),
        },
        "type" => match args.as_slice() {
            [key] => get::type_of(context, key),
            _ => Err(usage("type <key>")),
        },
        "set" => match rest.split_once(char::is_whitespace) {
            Some((key, value)) => set::execute(context, key, value.trim()),
            None => Err(usage("set <key> <value>")),
        },
        "del" => match args.as_slice() {
            [key] => del::execute(context, key),
            _ => Err(usage("del <key>")),
        },
        "push" => match args.split_first() {
            Some((key, values)) if !values.is_empty() => {
                let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                array::push(context, key, &values)
            }
            _ => Err(usage("push <key> <value>...")),
        },
        "pull" | "pull-value" => match rest.split_once(char::is_whitespace) {
            Some((key, value)) => array::pull_value(context, key, value.trim()),
            None => Err(usage("pull <key> <value>")),
        },
        "math" => {
            let allow_negative = args.contains(&"--allow-negative");
            let operands: Vec<&str> = args
                .iter()
                .copied()
                .filter(|a| *a != "--allow-negative")
                .collect();
            match operands.as_slice() {
                [key, operator, operand] => {
                    let operand: f64 = operand
                        .parse()
                        .map_err(|_| usage("math <key> <operator> <number> [--allow-negative]"))?;
                    math::execute(context, key, operator, operand, allow_negative)
                }
                _ => Err(usage("math <key> <operator> <number> [--allow-negative]")),
            }
        }
        "list" => match args.as_slice() {
            [] => list::execute(context, 0),
            [limit] => {
                let limit = limit.parse().map_err(|_| usage("list [limit]"))?;
                list::execute(context, limit)
            }
            _ => Err(usage("list [limit]")),
        },
        "keys" => list::keys(context),
        "clone" => match args.as_slice() {
            [] => clone::execute(context, None),
            [destination] => clone::execute(context, Some(Path::new(destination))),
            _ => Err(usage("clone [destination]")),
        },
        "save" => {
            context.db().save()?;
            println!("{}", context.formatter().format_success("Saved"));
            Ok(())
        }
        other => Err(CliError::UnknownCommand(other.to_string()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use novadb::DatabaseOptions;
    use serde_json::json;
    use tempfile::tempdir;

    use crate::formatters::OutputFormat;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("[1, 2]"), json!([1, 2]));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("plain text"), json!("plain text"));
    }

    #[test]
    fn test_dispatch_mutates_database() {
        let dir = tempdir().unwrap();
        let options = DatabaseOptions::default().with_path(dir.path());
        let mut context = Context::new(options, OutputFormat::Json).unwrap();

        dispatch(&mut context, "set user {\"name\": \"alice\", \"age\": 30}").unwrap();
        dispatch(&mut context, "math user.age + 5").unwrap();
        dispatch(&mut context, "push tags a b").unwrap();
        dispatch(&mut context, "pull tags \"a\"").unwrap();
        dispatch(&mut context, "del user.name").unwrap();

        let db = context.db();
        assert_eq!(db.get("user").unwrap(), Some(json!({"age": 35})));
        assert_eq!(db.get("tags").unwrap(), Some(json!(["b"])));
    }

    #[test]
    fn test_dispatch_errors() {
        let dir = tempdir().unwrap();
        let options = DatabaseOptions::default().with_path(dir.path());
        let mut context = Context::new(options, OutputFormat::Text).unwrap();

        assert!(dispatch(&mut context, "get").is_err());
        assert!(dispatch(&mut context, "frobnicate x").is_err());
        assert!(dispatch(&mut context, "math x ^ 2").is_err());
    }
}
