pub mod history;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

/// Reads a single line from the user, e.g. the API key during setup.
pub fn read_line(prompt: &str) -> Result<String> {
    let config = Config::builder().auto_add_history(false).build();
    let mut editor = DefaultEditor::with_config(config).context("Failed to open terminal")?;

    match editor.readline(prompt) {
        Ok(line) => Ok(line.trim().to_string()),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            Err(anyhow::anyhow!("Setup cancelled"))
        }
        Err(err) => Err(anyhow::anyhow!("Error reading input: {}", err)),
    }
}
