use anyhow::Result;
use log::{debug, info};
use std::io::Write;
use std::process::ExitCode;

use crate::cli::{self, Args};
use crate::config::{Config, ConfigStore};
use crate::llm::prompt::{build_messages, SystemInfo};
use crate::llm::{CommandGenerator, CompletionApi, GenerationError};
use crate::terminal::history::{HistoryEntry, HistoryStore};

pub const TEST_QUERY: &str = "list files in current directory";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::from(1),
        }
    }
}

pub struct App<F> {
    config: ConfigStore,
    history: HistoryStore,
    connect: F,
}

impl<F, C> App<F>
where
    F: Fn(&str) -> C,
    C: CompletionApi,
{
    /// `connect` builds the completion backend once an API key is known.
    pub fn new(config: ConfigStore, history: HistoryStore, connect: F) -> Self {
        App {
            config,
            history,
            connect,
        }
    }

    pub async fn run(
        &self,
        args: &Args,
        read_key: impl FnOnce() -> Result<String>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<Outcome> {
        if args.setup {
            return self.setup(read_key, out);
        }

        let config = self.config.load()?;
        let api_key = match config.api_key {
            Some(key) => key,
            None => {
                writeln!(
                    err,
                    "Error: Groq API key not found. Run with --setup or set GROQ_API_KEY environment variable"
                )?;
                return Ok(Outcome::Failure);
            }
        };

        let generator = CommandGenerator::new((self.connect)(&api_key));
        let system = SystemInfo::detect();

        if args.test {
            let messages = build_messages(TEST_QUERY, &[], &system);
            return match generator.generate(messages).await {
                Ok(command) if !command.is_empty() => {
                    writeln!(out, "✓ Connection successful! Test command: {}", command)?;
                    Ok(Outcome::Success)
                }
                Ok(_) => {
                    writeln!(err, "✗ Connection failed")?;
                    Ok(Outcome::Failure)
                }
                Err(e) => {
                    report(err, &e)?;
                    writeln!(err, "✗ Connection failed")?;
                    Ok(Outcome::Failure)
                }
            };
        }

        let query = match args.query.as_deref() {
            Some(query) if !query.is_empty() => query,
            _ => {
                writeln!(err, "Error: No query provided")?;
                return Ok(Outcome::Failure);
            }
        };

        let context = cli::parse_context(args.context.as_deref());
        debug!("Using {} context entries", context.len());

        let command = match generator.generate(build_messages(query, &context, &system)).await {
            Ok(command) if !command.is_empty() => command,
            Ok(_) => return Ok(Outcome::Failure),
            Err(e) => {
                report(err, &e)?;
                return Ok(Outcome::Failure);
            }
        };

        self.history.append(HistoryEntry::new(query, command.as_str()))?;
        writeln!(out, "{}", command)?;
        Ok(Outcome::Success)
    }

    fn setup(
        &self,
        read_key: impl FnOnce() -> Result<String>,
        out: &mut dyn Write,
    ) -> Result<Outcome> {
        writeln!(out, "Setting up AI Terminal Assistant")?;
        out.flush()?;

        let api_key = read_key()?;
        self.config.save(&Config {
            api_key: Some(api_key),
        })?;
        info!("Saved API key to {}", self.config.config_file().display());

        writeln!(out, "Configuration saved to {}", self.config.config_file().display())?;
        Ok(Outcome::Success)
    }
}

fn report(err: &mut dyn Write, e: &GenerationError) -> std::io::Result<()> {
    writeln!(err, "Error: {}", e)
}
