use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Appointment, ServiceGroup};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroundingLink {
    pub uri: String,
    pub title: String,
}

/// One entry of the chat transcript, with whatever pickers the agent attached to it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub grounding_urls: Vec<GroundingLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Appointment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_slots: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_options: Option<Vec<ServiceGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_options: Option<Vec<String>>,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            is_error: false,
            grounding_urls: Vec::new(),
            appointment: None,
            available_slots: None,
            service_options: None,
            date_options: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(Role::Agent, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::new(Role::Agent, content)
        }
    }

    /// Role name the chat service expects for history turns.
    pub fn history_role(&self) -> &'static str {
        match self.role {
            Role::User => "user",
            Role::Agent | Role::System => "model",
        }
    }
}
