use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Command history persisted to a plain text file
pub struct History {
    file_path: PathBuf,
    commands: Vec<String>,
    max_size: usize,
}

impl History {
    pub fn new<P: Into<PathBuf>>(file_path: P, max_size: usize) -> Self {
        History {
            file_path: file_path.into(),
            commands: Vec::new(),
            max_size,
        }
    }

    /// Load history from the file, if it exists
    pub fn load(&mut self) -> Result<()> {
        if !Path::new(&self.file_path).exists() {
            return Ok(());
        }

        let reader = BufReader::new(File::open(&self.file_path)?);

        self.commands.clear();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                self.commands.push(line);
            }
        }

        if self.commands.len() > self.max_size {
            let excess = self.commands.len() - self.max_size;
            self.commands.drain(..excess);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.file_path)?;

        for cmd in &self.commands {
            writeln!(file, "{}", cmd)?;
        }

        Ok(())
    }

    /// Record a command, skipping blanks and consecutive duplicates
    pub fn add(&mut self, command: &str) {
        let command = command.trim();
        if command.is_empty() {
            return;
        }

        if self.commands.last().map_or(false, |last| last == command) {
            return;
        }

        self.commands.push(command.to_string());

        if self.commands.len() > self.max_size {
            self.commands.remove(0);
        }
    }

    pub fn get_all(&self) -> &[String] {
        &self.commands
    }

    pub fn search(&self, pattern: &str) -> Vec<String> {
        self.commands
            .iter()
            .filter(|cmd| cmd.contains(pattern))
            .cloned()
            .collect()
    }
}
