use serde::{Deserialize, Serialize};

use crate::terminal::history::HistoryEntry;

/// Number of past exchanges replayed to the model.
pub const CONTEXT_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Message {
            role,
            content: content.into(),
        }
    }
}

/// The parts of the local environment the model is told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os_name: String,
    pub os_release: String,
    pub shell: String,
    pub working_dir: String,
}

impl SystemInfo {
    pub fn detect() -> Self {
        let (os_name, os_release) = match nix::sys::utsname::uname() {
            Ok(uts) => (
                uts.sysname().to_string_lossy().into_owned(),
                uts.release().to_string_lossy().into_owned(),
            ),
            Err(_) => (std::env::consts::OS.to_string(), String::new()),
        };

        SystemInfo {
            os_name,
            os_release,
            shell: std::env::var("SHELL").unwrap_or_else(|_| "unknown".to_string()),
            working_dir: std::env::current_dir()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
        }
    }
}

pub fn system_prompt(info: &SystemInfo) -> String {
    format!(
        "You are a terminal command assistant. Generate ONLY the terminal command needed, nothing else.

System: {} {}
Shell: {}
Working Directory: {}

Rules:
1. Output ONLY the command, no explanations, no markdown, no code blocks
2. Use Unix/Linux/macOS commands appropriate for the system
3. Be concise and practical
4. If multiple commands are needed, separate with && or ;
5. Always consider safety - avoid destructive commands without confirmation flags",
        info.os_name, info.os_release, info.shell, info.working_dir
    )
}

/// System prompt, the last few exchanges oldest-first, then the query.
pub fn build_messages(query: &str, context: &[HistoryEntry], info: &SystemInfo) -> Vec<Message> {
    let recent = &context[context.len().saturating_sub(CONTEXT_WINDOW)..];

    let mut messages = Vec::with_capacity(2 + recent.len() * 2);
    messages.push(Message::new(Role::System, system_prompt(info)));
    for entry in recent {
        messages.push(Message::new(Role::User, entry.query.as_str()));
        messages.push(Message::new(Role::Assistant, entry.command.as_str()));
    }
    messages.push(Message::new(Role::User, query));
    messages
}
