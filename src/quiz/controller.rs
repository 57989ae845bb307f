use log::{info, warn};

use crate::quiz::questions::QuestionGenerator;
use crate::quiz::session::SessionState;
use crate::quiz::summary::SummaryGenerator;
use crate::quiz::{Answer, PreferencePrompt, QuestionPrompt, QuizError};

/// Where a session currently is.
///
/// `Complete` is the phase in which learning preferences are collected.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    AskingQuestion(QuestionPrompt),
    Complete,
    ShowingSummary(String),
}

impl Phase {
    fn describe(&self) -> &'static str {
        match self {
            Phase::AskingQuestion(_) => "asking a question",
            Phase::Complete => "collecting preferences",
            Phase::ShowingSummary(_) => "showing the summary",
        }
    }
}

/// Serializable snapshot of one learner's session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub state: SessionState,
    pub phase: Phase,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::new(),
            phase: Phase::AskingQuestion(QuestionPrompt::bootstrap()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Question(QuestionPrompt),
    Preferences(PreferencePrompt),
    Summary(String),
}

/// What the presentation layer should show and which controls to enable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayDirective {
    pub view: View,
    pub skip_available: bool,
    pub preferences_available: bool,
    pub restart_available: bool,
}

/// Drives one session through its phases.
///
/// Every event makes at most one model call. An event that the current phase
/// does not accept fails with [`QuizError::InvalidTransition`] and changes nothing.
pub struct SessionController {
    questions: QuestionGenerator,
    summaries: SummaryGenerator,
    session: Session,
}

impl SessionController {
    pub fn new(questions: QuestionGenerator, summaries: SummaryGenerator) -> Self {
        Self::resume(questions, summaries, Session::default())
    }

    pub fn resume(
        questions: QuestionGenerator,
        summaries: SummaryGenerator,
        session: Session,
    ) -> Self {
        Self {
            questions,
            summaries,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    pub fn display(&self) -> DisplayDirective {
        let state = &self.session.state;
        match &self.session.phase {
            Phase::AskingQuestion(prompt) => DisplayDirective {
                view: View::Question(prompt.clone()),
                skip_available: state.skip_available(),
                preferences_available: false,
                restart_available: false,
            },
            Phase::Complete => DisplayDirective {
                view: View::Preferences(PreferencePrompt::default()),
                skip_available: false,
                preferences_available: true,
                restart_available: false,
            },
            Phase::ShowingSummary(summary) => DisplayDirective {
                view: View::Summary(summary.clone()),
                skip_available: false,
                preferences_available: true,
                restart_available: true,
            },
        }
    }

    /// Records the answer, then either asks the next question or moves to
    /// `Complete` once the last answer is in.
    ///
    /// A failed model call leaves the answer recorded.
    pub async fn submit_answer(&mut self, answer: Answer) -> Result<DisplayDirective, QuizError> {
        if !matches!(self.session.phase, Phase::AskingQuestion(_)) {
            return Err(self.rejected("submit answer"));
        }
        if !self.session.state.record(answer) {
            return Err(self.rejected("submit answer"));
        }

        let state = &self.session.state;
        if state.is_complete() {
            info!("All {} answers recorded, collecting preferences", state.answers().len());
            self.session.phase = Phase::Complete;
            return Ok(self.display());
        }

        let prompt = self.questions.next(state.answers()).await?;
        self.session.phase = Phase::AskingQuestion(prompt);
        Ok(self.display())
    }

    /// Ends the question phase early and summarizes whatever was answered.
    pub async fn skip(&mut self) -> Result<DisplayDirective, QuizError> {
        if !matches!(self.session.phase, Phase::AskingQuestion(_))
            || !self.session.state.skip_available()
        {
            return Err(self.rejected("skip"));
        }
        info!(
            "Skipping to summary after {} answers",
            self.session.state.answers().len()
        );
        self.session.phase = Phase::Complete;
        self.show_summary().await
    }

    /// Stores the preferences, replacing earlier ones, and regenerates the summary.
    pub async fn submit_preferences<I, S>(
        &mut self,
        preferences: I,
    ) -> Result<DisplayDirective, QuizError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if matches!(self.session.phase, Phase::AskingQuestion(_)) {
            return Err(self.rejected("submit preferences"));
        }
        self.session.state.set_preferences(preferences);
        self.show_summary().await
    }

    /// Clears the session and goes back to the bootstrap question.
    pub fn restart(&mut self) -> Result<DisplayDirective, QuizError> {
        if !matches!(self.session.phase, Phase::ShowingSummary(_)) {
            return Err(self.rejected("restart"));
        }
        info!("Restarting session");
        self.session = Session::default();
        Ok(self.display())
    }

    async fn show_summary(&mut self) -> Result<DisplayDirective, QuizError> {
        let state = &self.session.state;
        let summary = self
            .summaries
            .summarize(state.answers(), state.preferences())
            .await?;
        self.session.phase = Phase::ShowingSummary(summary);
        Ok(self.display())
    }

    fn rejected(&self, event: &'static str) -> QuizError {
        let phase = self.session.phase.describe();
        warn!("Rejected `{}` while {}", event, phase);
        QuizError::InvalidTransition { event, phase }
    }
}
