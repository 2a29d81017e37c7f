use chrono::{DateTime, Utc};
use parley_llm::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    Assistant,
    User,
}

/// One message of a conversation. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    id: Uuid,
    role: TurnRole,
    content: String,
    created_at: DateTime<Utc>,
}

impl Turn {
    fn new(role: TurnRole, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content.into())
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content.into())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn to_message(&self) -> Message {
        match self.role {
            TurnRole::User => Message::human(self.content.clone()),
            TurnRole::Assistant => Message::ai(self.content.clone()),
        }
    }
}
