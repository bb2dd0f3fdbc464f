mod history;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use self::history::History;
use crate::commands;
use crate::context::Context;
use crate::formatters::OutputFormat;
use crate::utils::error::CliError;

const HISTORY_FILE: &str = "novadb_history.txt";

/// Interactive mode
pub struct Repl {
    context: Context,
    editor: DefaultEditor,
    history: History,
}

impl Repl {
    pub fn new(context: Context) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        let mut history = History::new(HISTORY_FILE, 1000);
        if let Err(e) = history.load() {
            log::warn!("Could not load {}: {}", HISTORY_FILE, e);
        }

        for cmd in history.get_all() {
            let _ = editor.add_history_entry(cmd.as_str());
        }

        Ok(Repl {
            context,
            editor,
            history,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.context.formatter().format_info("novadb interactive mode"));
        println!("{}", self.context.formatter().format_info("Type .help for help or .exit to quit"));

        loop {
            match self.editor.readline("novadb> ") {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.history.add(&line);

                    match self.process_line(line.trim()) {
                        Ok(true) => {}
                        Ok(false) => break,
                        Err(e) => {
                            println!("{}", self.context.formatter().format_error(&e.to_string()))
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    println!("{}", self.context.formatter().format_error(&err.to_string()));
                    break;
                }
            }
        }

        self.history.save()?;
        Ok(())
    }

    /// Handle one line; `Ok(false)` ends the session
    fn process_line(&mut self, line: &str) -> Result<bool> {
        if line.is_empty() {
            return Ok(true);
        }

        if let Some(special) = line.strip_prefix('.') {
            return self.process_special_command(special);
        }

        commands::dispatch(&mut self.context, line)?;
        Ok(true)
    }

    fn process_special_command(&mut self, cmd: &str) -> Result<bool> {
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        match parts.as_slice() {
            ["help"] => self.print_help(),
            ["exit"] | ["quit"] => return Ok(false),
            ["format", name] => {
                let format = OutputFormat::parse(name)
                    .ok_or_else(|| CliError::UnknownFormat(name.to_string()))?;
                self.context.set_format(format);
                println!(
                    "{}",
                    self.context
                        .formatter()
                        .format_success(&format!("Output format set to {}", name))
                );
            }
            ["history", rest @ ..] => {
                let commands = match rest.first() {
                    Some(pattern) => self.history.search(pattern),
                    None => self.history.get_all().to_vec(),
                };

                if commands.is_empty() {
                    println!("{}", self.context.formatter().format_info("History is empty"));
                }
                for (i, cmd) in commands.iter().enumerate() {
                    println!("{}: {}", i + 1, cmd);
                }
            }
            _ => return Err(CliError::UnknownCommand(format!(".{}", cmd)).into()),
        }

        Ok(true)
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  get <key>                       Print a value");
        println!("  set <key> <value>               Store a value (JSON or plain text)");
        println!("  del <key>                       Delete a key");
        println!("  has <key>                       Check whether a key exists");
        println!("  type <key>                      Print the type of a value");
        println!("  push <key> <value>...           Append to an array");
        println!("  pull <key> <value>              Remove matching elements from an array");
        println!("  math <key> <op> <n> [--allow-negative]");
        println!("                                  Apply + - * / % ** to a number");
        println!("  list [limit]                    List top-level pairs");
        println!("  keys                            List top-level keys");
        println!("  clone [destination]             Copy the database file");
        println!("  save                            Write the database to disk");
        println!();
        println!("  .help                           Show this help");
        println!("  .exit, .quit                    Leave the REPL");
        println!("  .format <text|json|table>       Change the output format");
        println!("  .history [pattern]              Show command history");
    }
}
