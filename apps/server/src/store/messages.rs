use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{StoreError, present};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: u32,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMessage {
    pub content: Option<String>,
}

/// Append-only message log
#[derive(Default)]
pub struct MessageLog {
    messages: RwLock<Vec<Message>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn post(&self, request: NewMessage) -> Result<Message, StoreError> {
        let content = present(request.content).ok_or(StoreError::MissingField("content"))?;

        let mut messages = self.messages.write();
        let id = u32::try_from(messages.len()).unwrap_or(u32::MAX).saturating_add(1);
        let message = Message { id, content, created_at: Utc::now() };
        messages.push(message.clone());

        Ok(message)
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
