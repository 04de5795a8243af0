use autodoc_core::{Content, Result, UsageMetadata};
use chrono::{DateTime, Utc};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use uuid::Uuid;

pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event>> + Send>>;

/// One message produced during an agent run: a model turn or a batch of tool results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub invocation_id: String,
    pub author: String,
    pub content: Option<Content>,
    pub usage_metadata: Option<UsageMetadata>,
}

impl Event {
    pub fn new(invocation_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            invocation_id: invocation_id.into(),
            author: String::new(),
            content: None,
            usage_metadata: None,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content = Some(content);
        self
    }
}
