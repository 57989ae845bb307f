use std::collections::BTreeSet;

use crate::quiz::{Answer, MAX_QUESTIONS, SKIP_THRESHOLD};

/// Everything one learner has told us during a single session.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionState {
    answers: Vec<Answer>,
    preferences: BTreeSet<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an answer. Returns `false` and records nothing once the session is complete.
    pub fn record(&mut self, answer: Answer) -> bool {
        if self.is_complete() {
            return false;
        }
        self.answers.push(answer);
        true
    }

    /// Replaces any previously stored preferences.
    pub fn set_preferences<I, S>(&mut self, preferences: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.preferences = preferences.into_iter().map(Into::into).collect();
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn preferences(&self) -> &BTreeSet<String> {
        &self.preferences
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= MAX_QUESTIONS
    }

    pub fn skip_available(&self) -> bool {
        self.answers.len() >= SKIP_THRESHOLD
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.preferences.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_holds_more_than_max_answers() {
        let mut state = SessionState::new();
        for i in 0..MAX_QUESTIONS {
            assert!(!state.is_complete());
            assert!(state.record(Answer::new(format!("answer {i}"))));
        }
        assert!(state.is_complete());
        assert!(!state.record(Answer::new("one too many")));
        assert_eq!(state.answers().len(), MAX_QUESTIONS);
        assert_eq!(state.answers().last().unwrap().as_str(), "answer 9");
    }

    #[test]
    fn skip_becomes_available_at_three_answers() {
        let mut state = SessionState::new();
        for count in 0..=MAX_QUESTIONS {
            assert_eq!(state.skip_available(), count >= SKIP_THRESHOLD, "{count} answers");
            state.record(Answer::new("x"));
        }
    }

    #[test]
    fn later_preferences_overwrite_earlier_ones() {
        let mut state = SessionState::new();
        state.set_preferences(["Reading articles", "Watching videos"]);
        state.set_preferences(["Taking online courses"]);
        assert_eq!(
            state.preferences(),
            &BTreeSet::from(["Taking online courses".to_string()])
        );
    }

    #[test]
    fn clear_empties_everything() {
        let mut state = SessionState::new();
        state.record(Answer::new("To build apps that use AI"));
        state.set_preferences(["Watching videos"]);
        state.clear();
        assert_eq!(state, SessionState::new());
    }
}
