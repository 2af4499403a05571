mod api_client;
pub mod prompt;

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use thiserror::Error;

pub use self::api_client::GroqClient;
use self::prompt::Message;

pub const MODEL: &str = "groq/compound-mini";

pub const DECODING: Decoding = Decoding {
    temperature: 0.3,
    max_tokens: 150,
    top_p: 0.9,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decoding {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub decoding: Decoding,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("API returned no completion")]
    EmptyResponse,
}

/// A chat-completion backend.
#[async_trait]
pub trait CompletionApi {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}

lazy_static! {
    static ref FENCE_LINE_RE: Regex = Regex::new(r"^```").unwrap();
}

pub struct CommandGenerator<C> {
    api: C,
}

impl<C: CompletionApi> CommandGenerator<C> {
    pub fn new(api: C) -> Self {
        CommandGenerator { api }
    }

    pub async fn generate(&self, messages: Vec<Message>) -> Result<String, GenerationError> {
        let request = CompletionRequest {
            model: MODEL.to_string(),
            messages,
            decoding: DECODING,
        };

        let raw = self.api.complete(&request).await?;
        debug!("Raw completion: {:?}", raw);
        Ok(clean_command_output(&raw))
    }
}

/// Strips code fences the model sometimes adds despite being told not to.
pub fn clean_command_output(output: &str) -> String {
    let command = output.trim();
    if !FENCE_LINE_RE.is_match(command) {
        return command.to_string();
    }

    command
        .split('\n')
        .filter(|line| !FENCE_LINE_RE.is_match(line))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
