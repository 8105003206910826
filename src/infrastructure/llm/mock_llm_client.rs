use parking_lot::Mutex;

use crate::application::ports::{LlmClient, LlmClientError};

/// Replays a canned response and remembers the last prompt it was sent.
pub struct MockLlmClient {
    response: String,
    last_prompt: Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, _instructions: &str, prompt: &str) -> Result<String, LlmClientError> {
        *self.last_prompt.lock() = Some(prompt.to_string());
        Ok(self.response.clone())
    }
}
