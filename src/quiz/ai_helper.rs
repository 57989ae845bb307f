use async_trait::async_trait;
use chatgpt::client::ChatGPT;
use chatgpt::types::CompletionResponse;
use log::debug;

use crate::quiz::QuizError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }
}

/// A text-completion capability: role-tagged messages in, one reply out.
///
/// Retries, model selection and temperature belong to the implementation.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, QuizError>;
}

fn joined(messages: &[PromptMessage], role: PromptRole) -> String {
    messages
        .iter()
        .filter(|m| m.role == role)
        .map(|m| m.content.trim())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Completion for ChatGPT {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, QuizError> {
        let direction = joined(messages, PromptRole::System);
        let question = joined(messages, PromptRole::User);
        debug!("Sending completion request: {:?}", question);

        let mut conversation = self.new_conversation_directed(direction);
        let response: CompletionResponse = conversation
            .send_message(question)
            .await
            .map_err(QuizError::model)?;
        let content = response.message().clone().content;

        debug!("Completion: {:?}", content);

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_messages_of_one_role_in_order() {
        let messages = [
            PromptMessage::system("  You are a tutor. "),
            PromptMessage::user("first"),
            PromptMessage::system("Be brief."),
            PromptMessage::user("second\n"),
        ];
        assert_eq!(
            joined(&messages, PromptRole::System),
            "You are a tutor.\n\nBe brief."
        );
        assert_eq!(joined(&messages, PromptRole::User), "first\n\nsecond");
    }
}
