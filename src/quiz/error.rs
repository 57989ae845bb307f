use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the quiz core. None of them are recovered inside the core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    /// Model text could not be split into a question and its choices.
    #[error("model response has no question/choice separator: {0:?}")]
    MalformedResponse(String),
    /// The completion call itself failed (network, auth, quota, timeout).
    #[error("model call failed: {0}")]
    ModelCallFailure(#[source] BoxError),
    #[error("`{event}` is not allowed while {phase}")]
    InvalidTransition {
        event: &'static str,
        phase: &'static str,
    },
}

impl QuizError {
    pub fn model(err: impl Into<BoxError>) -> Self {
        Self::ModelCallFailure(err.into())
    }
}
