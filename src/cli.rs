use clap::Parser;
use log::debug;

use crate::terminal::history::HistoryEntry;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "autoterm", version, about = "AI Terminal Command Generator")]
pub struct Args {
    /// Query to generate a command for
    pub query: Option<String>,

    /// Setup API key
    #[arg(long)]
    pub setup: bool,

    /// JSON array of previous {"query", "command"} exchanges
    #[arg(long, value_name = "JSON")]
    pub context: Option<String>,

    /// Test the connection
    #[arg(long)]
    pub test: bool,
}

/// Prior exchanges passed with `--context`. Empty when the flag is absent;
/// a value that does not parse is treated as empty rather than an error.
pub fn parse_context(raw: Option<&str>) -> Vec<HistoryEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<HistoryEntry>>(raw) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Ignoring malformed --context: {}", e);
            Vec::new()
        }
    }
}
