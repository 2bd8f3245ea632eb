pub mod gemini;
pub mod tools;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::GroundingLink;

pub use tools::{BookingArgs, ToolCall};

/// A prior turn, tagged `user` or `model`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub history: Vec<Message>,
    pub message: String,
    pub instruction: String,
    /// Web search replaces the booking tool set for this turn.
    pub use_search: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ChatReply {
    pub text: String,
    pub grounding: Vec<GroundingLink>,
    pub tool_calls: Vec<ToolCall>,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn chat(&self, request: ChatRequest) -> anyhow::Result<ChatReply>;
}
