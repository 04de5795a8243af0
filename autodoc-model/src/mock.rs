use autodoc_core::{
    AutodocError, Content, Llm, LlmRequest, LlmResponse, LlmResponseStream, Part, ROLE_MODEL,
    Result,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted model: each `generate_content` call replays the next queued response and records
/// the request it was given.
pub struct MockLlm {
    name: String,
    responses: Mutex<VecDeque<Result<LlmResponse>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, response: LlmResponse) -> Self {
        self.push(Ok(response));
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_response(LlmResponse::new(Content::new(ROLE_MODEL).with_text(text)))
    }

    pub fn with_function_call(self, name: impl Into<String>, args: Value) -> Self {
        self.with_response(LlmResponse::new(
            Content::new(ROLE_MODEL).with_part(Part::function_call(name, args)),
        ))
    }

    /// Queue a failing turn.
    pub fn with_error(self, message: impl Into<String>) -> Self {
        self.push(Err(AutodocError::Model(message.into())));
        self
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.responses.lock().map(|r| r.len()).unwrap_or_default()
    }

    fn push(&self, response: Result<LlmResponse>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_content(&self, req: LlmRequest, _stream: bool) -> Result<LlmResponseStream> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(req);
        }
        let next = self
            .responses
            .lock()
            .map_err(|_| AutodocError::Model("MockLlm lock poisoned".to_string()))?
            .pop_front()
            .ok_or_else(|| {
                AutodocError::Model(format!("MockLlm '{}' has no more responses", self.name))
            })?;

        let stream = async_stream::stream! {
            yield next;
        };
        Ok(Box::pin(stream))
    }
}
