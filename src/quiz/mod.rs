pub mod ai_helper;
pub mod controller;
pub mod error;
pub mod parser;
pub mod questions;
pub mod session;
pub mod summary;

#[cfg(test)]
pub mod mock;

pub use error::QuizError;

/// The quiz ends after this many recorded answers.
pub const MAX_QUESTIONS: usize = 10;
/// "Skip to Summary" becomes available once this many answers are recorded.
pub const SKIP_THRESHOLD: usize = 3;

/// Trailing option of every question, lets the learner type their own answer.
pub const OTHER_CHOICE: &str = "Other (please specify)";

pub const INITIAL_QUESTION: &str = "Why are you learning Generative AI?";
pub const INITIAL_CHOICES: [&str; 3] = [
    "To assist with daily life tasks",
    "To build apps that use AI",
    "To train or fine-tune AI models",
];

pub const PREFERENCE_LABEL: &str = "How do you prefer to learn?";
pub const PREFERENCE_CHOICES: [&str; 4] = [
    "Reading articles",
    "Watching videos",
    "Building side projects",
    "Taking online courses",
];

/// One question shown to the learner. `choices` always ends with [`OTHER_CHOICE`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionPrompt {
    pub question: String,
    pub choices: Vec<String>,
}

impl QuestionPrompt {
    pub fn new(question: String, mut choices: Vec<String>) -> Self {
        choices.push(OTHER_CHOICE.to_string());
        Self { question, choices }
    }

    /// The hardcoded first question, asked without a model call.
    pub fn bootstrap() -> Self {
        Self::new(
            INITIAL_QUESTION.to_string(),
            INITIAL_CHOICES.iter().map(|c| c.to_string()).collect(),
        )
    }
}

/// The learning-style question asked once the question phase is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencePrompt {
    pub label: String,
    pub choices: Vec<String>,
}

impl Default for PreferencePrompt {
    fn default() -> Self {
        Self {
            label: PREFERENCE_LABEL.to_string(),
            choices: PREFERENCE_CHOICES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// A single recorded learner response.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Answer(String);

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The free text wins when the sentinel choice was picked and something was typed.
    pub fn from_selection(selected: &str, other_text: Option<&str>) -> Self {
        match other_text.map(str::trim) {
            Some(other) if selected == OTHER_CHOICE && !other.is_empty() => Self::new(other),
            _ => Self::new(selected),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_prompt_ends_with_sentinel() {
        let prompt = QuestionPrompt::bootstrap();
        assert_eq!(prompt.question, INITIAL_QUESTION);
        assert_eq!(prompt.choices.len(), 4);
        assert_eq!(prompt.choices[..3], INITIAL_CHOICES.map(String::from));
        assert_eq!(prompt.choices.last().unwrap(), OTHER_CHOICE);
    }

    #[test]
    fn other_text_overrides_sentinel_only() {
        assert_eq!(
            Answer::from_selection(OTHER_CHOICE, Some("  I teach AI  ")).as_str(),
            "I teach AI"
        );
        assert_eq!(
            Answer::from_selection(OTHER_CHOICE, Some("   ")).as_str(),
            OTHER_CHOICE
        );
        assert_eq!(
            Answer::from_selection("Watching videos", Some("ignored")).as_str(),
            "Watching videos"
        );
        assert_eq!(Answer::from_selection(OTHER_CHOICE, None).as_str(), OTHER_CHOICE);
    }
}
