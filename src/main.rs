mod app;
mod cli;
mod config;
mod llm;
mod terminal;

use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

use crate::app::App;
use crate::config::{AppPaths, ConfigStore};
use crate::llm::GroqClient;
use crate::terminal::history::HistoryStore;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    dotenv::dotenv().ok();

    let args = cli::Args::parse();
    let paths = AppPaths::from_home()?;

    let app = App::new(
        ConfigStore::new(paths.clone()),
        HistoryStore::new(paths.history_file),
        |key: &str| GroqClient::new(key),
    );

    let outcome = app
        .run(
            &args,
            || terminal::read_line("Enter your Groq API key: "),
            &mut io::stdout(),
            &mut io::stderr(),
        )
        .await?;

    Ok(outcome.into())
}
