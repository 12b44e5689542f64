//! Turns a host's sampling request into a single chat completion.
//!
//! Only text content is forwarded; images and audio are dropped. Failures are
//! available as a typed error from [`SamplingHandler::try_sample`], while
//! [`SamplingHandler::handle`] folds them into an inline `[Error: ...]` string.

use crate::error::SamplingError;
use crate::traits::{ChatMessage, ChatRequest, Provider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SamplingContent {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Audio {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SamplingMessage {
    pub role: Role,
    pub content: SamplingContent,
}

impl SamplingMessage {
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            content: SamplingContent::Text { text: text.into() },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SamplingParams {
    pub system_prompt: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

/// Flattens a conversation into role/content pairs, system prompt first.
pub fn build_chat_messages(
    messages: &[SamplingMessage],
    params: &SamplingParams,
) -> Vec<ChatMessage> {
    let system = params
        .system_prompt
        .as_deref()
        .filter(|prompt| !prompt.is_empty())
        .map(ChatMessage::system);

    let conversation = messages.iter().filter_map(|m| match &m.content {
        SamplingContent::Text { text } => Some(ChatMessage::new(m.role.as_str(), text.as_str())),
        SamplingContent::Image { .. } | SamplingContent::Audio { .. } => None,
    });

    system.into_iter().chain(conversation).collect()
}

pub struct SamplingHandler {
    provider: Arc<dyn Provider>,
}

impl SamplingHandler {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    pub async fn try_sample(
        &self,
        messages: &[SamplingMessage],
        params: &SamplingParams,
    ) -> Result<String, SamplingError> {
        let chat_messages = build_chat_messages(messages, params);
        let request = ChatRequest {
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            ..ChatRequest::new(&chat_messages)
        };

        let response = self.provider.chat(request).await?;
        response.text.ok_or(SamplingError::EmptyCompletion)
    }

    /// Like [`Self::try_sample`], but never fails.
    pub async fn handle(&self, messages: &[SamplingMessage], params: &SamplingParams) -> String {
        match self.try_sample(messages, params).await {
            Ok(text) => text,
            Err(e) => {
                warn!(model = self.provider.model(), "Sampling failed: {}", e);
                format!("[Error: LLM failed: {e}]")
            }
        }
    }
}
