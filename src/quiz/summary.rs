use std::collections::BTreeSet;
use std::sync::Arc;

use log::info;

use crate::quiz::ai_helper::{Completion, PromptMessage};
use crate::quiz::{Answer, QuizError};

const SUMMARY_DIRECTIVE: &str = "You are an expert AI tutor summarizing a learner's progress and goals in GenAI.
Provide a detailed learning path and recommend high-quality resources (articles, videos, courses, or project ideas) based on the user's preferences.";

/// Produces the final learning-path text. The reply is returned untouched.
#[derive(Clone)]
pub struct SummaryGenerator {
    model: Arc<dyn Completion>,
}

impl SummaryGenerator {
    pub fn new(model: Arc<dyn Completion>) -> Self {
        Self { model }
    }

    pub async fn summarize(
        &self,
        history: &[Answer],
        preferences: &BTreeSet<String>,
    ) -> Result<String, QuizError> {
        info!(
            "Summarizing {} answers with {} preferences",
            history.len(),
            preferences.len()
        );
        self.model
            .complete(&prompt_for(history, preferences))
            .await
    }
}

fn prompt_for(history: &[Answer], preferences: &BTreeSet<String>) -> Vec<PromptMessage> {
    let answers = history.iter().map(Answer::as_str).collect::<Vec<_>>();
    vec![
        PromptMessage::system(SUMMARY_DIRECTIVE),
        PromptMessage::user(format!(
            "These are the user's answers: {:?}. Their preferred learning methods are: {:?}. \
             Generate a detailed GenAI learning path with links to preferred types of resources for each step.",
            answers, preferences
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::mock::ScriptedModel;

    #[tokio::test]
    async fn embeds_history_and_preferences_and_returns_raw_text() {
        let model = Arc::new(ScriptedModel::new(
            "## Week 1\nWatch the intro lecture?\n- link",
        ));
        let generator = SummaryGenerator::new(model.clone());
        let history = vec![Answer::new("To assist with daily life tasks")];
        let preferences = BTreeSet::from(["Watching videos".to_string()]);

        let summary = generator.summarize(&history, &preferences).await.unwrap();

        assert_eq!(summary, "## Week 1\nWatch the intro lecture?\n- link");
        assert_eq!(model.call_count(), 1);
        let user = model.last_user_message();
        assert!(user.contains(r#"["To assist with daily life tasks"]"#));
        assert!(user.contains(r#"{"Watching videos"}"#));
    }

    #[tokio::test]
    async fn model_failure_propagates() {
        let model = Arc::new(ScriptedModel::new("unused").with_failure("invalid api key"));
        let generator = SummaryGenerator::new(model);

        let err = generator
            .summarize(&[], &BTreeSet::new())
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::ModelCallFailure(_)));
    }
}
