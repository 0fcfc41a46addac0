//! Request and response bodies for the processing endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use scout_core::{ChatMessage, Role};

use crate::{Error, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatSessionPayload {
    /// Identifier of the client's chat session, echoed back.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Chronological transcript.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Delegate credential for this request only.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Join every user message instead of taking the last one.
    #[serde(default)]
    pub use_full_history: bool,
    /// Text to process instead of anything derived from the transcript.
    #[serde(default)]
    pub prompt_override: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedResponse {
    pub session_id: Option<String>,
    pub prompt: String,
    pub parameters: Map<String, Value>,
    pub meta: ResponseMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub messages_received: usize,
    pub user_messages_processed: usize,
    pub used_full_history: bool,
    pub used_delegate: bool,
    pub processed_at: DateTime<Utc>,
    pub prompt_override_used: bool,
}

/// The text chosen for extraction and how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSelection {
    pub prompt: String,
    pub user_messages: usize,
    pub override_used: bool,
}

impl ChatSessionPayload {
    /// Pick the prompt: trimmed override, else all user messages joined by
    /// newlines when `use_full_history` is set, else the last user message.
    ///
    /// Only user messages with non-blank content count; there must be at
    /// least one even when an override is supplied.
    pub fn select_prompt(&self) -> Result<PromptSelection> {
        let user_messages: Vec<&str> = self
            .messages
            .iter()
            .filter(|msg| msg.role == Role::User)
            .map(|msg| msg.content.trim())
            .filter(|content| !content.is_empty())
            .collect();

        let Some(last) = user_messages.last() else {
            return Err(Error::NoUserContent);
        };

        let override_text = self
            .prompt_override
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());

        let prompt = match override_text {
            Some(text) => text.to_string(),
            None if self.use_full_history => user_messages.join("\n"),
            None => (*last).to_string(),
        };

        Ok(PromptSelection {
            prompt,
            user_messages: user_messages.len(),
            override_used: override_text.is_some(),
        })
    }
}
