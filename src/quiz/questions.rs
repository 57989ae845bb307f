use std::sync::Arc;

use log::info;

use crate::quiz::ai_helper::{Completion, PromptMessage};
use crate::quiz::parser::ResponseParser;
use crate::quiz::{Answer, QuestionPrompt, QuizError};

const TUTOR_DIRECTIVE: &str = "You are a GenAI tutor helping the user assess their knowledge and goals in Generative AI.
Based on their previous answers and whether they are correct, you will ask one follow-up non-trivial question to assess their understanding.
The question should ask about their current progress in GenAI learning and the choices should be the next steps in their learning.
Return the question followed by a list of 3-5 single-choice options.";

const HISTORY_SEPARATOR: &str = " | ";

/// Asks the model for the next question based on the answers so far.
#[derive(Clone)]
pub struct QuestionGenerator {
    model: Arc<dyn Completion>,
    parser: ResponseParser,
}

impl QuestionGenerator {
    pub fn new(model: Arc<dyn Completion>, parser: ResponseParser) -> Self {
        Self { model, parser }
    }

    pub async fn next(&self, history: &[Answer]) -> Result<QuestionPrompt, QuizError> {
        info!("Generating question after {} answers", history.len());
        let raw = self.model.complete(&prompt_for(history)).await?;
        self.parser.parse(&raw)
    }
}

fn prompt_for(history: &[Answer]) -> Vec<PromptMessage> {
    let context = history
        .iter()
        .map(Answer::as_str)
        .collect::<Vec<_>>()
        .join(HISTORY_SEPARATOR);
    vec![
        PromptMessage::system(TUTOR_DIRECTIVE),
        PromptMessage::user(format!(
            "Here are the previous responses: {}. \
             What is the next single-choice question I should ask them about GenAI?",
            context
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::ai_helper::PromptRole;
    use crate::quiz::mock::ScriptedModel;
    use crate::quiz::OTHER_CHOICE;

    fn history() -> Vec<Answer> {
        vec![
            Answer::new("To build apps that use AI"),
            Answer::new("Building side projects"),
        ]
    }

    #[tokio::test]
    async fn sends_directive_and_joined_history_once() {
        let model = Arc::new(ScriptedModel::new(
            "Have you used an LLM API before?\nNever\nA few times\nIn production",
        ));
        let generator = QuestionGenerator::new(model.clone(), ResponseParser::default());

        let prompt = generator.next(&history()).await.unwrap();

        assert_eq!(model.call_count(), 1);
        let messages = &model.calls()[0];
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, PromptRole::System);
        assert!(messages[0].content.contains("3-5 single-choice options"));
        assert_eq!(messages[1].role, PromptRole::User);
        assert!(messages[1]
            .content
            .contains("To build apps that use AI | Building side projects"));

        assert_eq!(prompt.question, "Have you used an LLM API before");
        assert_eq!(
            prompt.choices,
            vec!["Never", "A few times", "In production", OTHER_CHOICE]
        );
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let model = Arc::new(ScriptedModel::new("unused").with_failure("rate limited"));
        let generator = QuestionGenerator::new(model.clone(), ResponseParser::default());

        let err = generator.next(&history()).await.unwrap_err();
        assert!(matches!(err, QuizError::ModelCallFailure(_)));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn unparseable_reply_is_malformed() {
        let model = Arc::new(ScriptedModel::new("I cannot help with that."));
        let generator = QuestionGenerator::new(model, ResponseParser::default());

        let err = generator.next(&history()).await.unwrap_err();
        assert!(matches!(err, QuizError::MalformedResponse(_)));
    }
}
