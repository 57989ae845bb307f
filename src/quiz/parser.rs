use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::quiz::{QuestionPrompt, QuizError};

/// How choice lines coming back from the model are cleaned up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChoiceStyle {
    /// Lines are passed through as the model wrote them.
    #[default]
    Verbatim,
    /// Leading enumeration markers such as `1.`, `b)`, `-` or `*` are removed.
    StripMarkers,
}

/// Splits free-form model output into a [`QuestionPrompt`].
///
/// Everything before the first `?` is the question. The rest of that line is
/// dropped and every following non-blank line is a choice. Without a `?` the
/// first line break is used as the boundary instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseParser {
    style: ChoiceStyle,
}

impl ResponseParser {
    pub fn new(style: ChoiceStyle) -> Self {
        Self { style }
    }

    pub fn parse(&self, raw_text: &str) -> Result<QuestionPrompt, QuizError> {
        debug!("Next question and choices to parse: {:?}", raw_text);
        let text = raw_text.trim();

        let (question, rest) = match text.find('?') {
            Some(idx) => {
                let after = &text[idx + 1..];
                // the tail of the question line is not a choice
                let rest = after.find('\n').map_or("", |nl| &after[nl + 1..]);
                (&text[..idx], rest)
            }
            None => text
                .split_once('\n')
                .ok_or_else(|| QuizError::MalformedResponse(raw_text.to_string()))?,
        };

        let question = question.trim();
        if question.is_empty() {
            return Err(QuizError::MalformedResponse(raw_text.to_string()));
        }

        let choices = rest
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| match self.style {
                ChoiceStyle::Verbatim => line.to_string(),
                ChoiceStyle::StripMarkers => strip_marker(line),
            })
            .collect();

        let prompt = QuestionPrompt::new(question.to_string(), choices);
        debug!("Next question: {:?}", prompt.question);
        debug!("Next choices: {:?}", prompt.choices);
        Ok(prompt)
    }
}

fn strip_marker(line: &str) -> String {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    let marker = MARKER.get_or_init(|| {
        Regex::new(r"^\s*(?:\d+[.)]|[A-Za-z]\)|[A-Z]\.\s|[-*•.)])\s*").expect("marker pattern is valid")
    });
    let stripped = marker.replace(line, "");
    if stripped.trim().is_empty() {
        // a line that is nothing but a marker stays as written
        line.to_string()
    } else {
        stripped.trim_end().to_string()
    }
}
