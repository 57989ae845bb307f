//! Scripted model used by the quiz tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::quiz::ai_helper::{Completion, PromptMessage, PromptRole};
use crate::quiz::QuizError;

/// Replies with queued texts in order, falls back to `default_reply`, and
/// records every message list it receives.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    default_reply: String,
    calls: Mutex<Vec<Vec<PromptMessage>>>,
}

impl ScriptedModel {
    pub fn new(default_reply: &str) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            default_reply: default_reply.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, reply: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.to_string()));
        self
    }

    pub fn with_failure(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Vec<PromptMessage>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_user_message(&self) -> String {
        self.calls
            .lock()
            .unwrap()
            .last()
            .and_then(|messages| messages.iter().find(|m| m.role == PromptRole::User))
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Completion for ScriptedModel {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, QuizError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(QuizError::model(message)),
            None => Ok(self.default_reply.clone()),
        }
    }
}
