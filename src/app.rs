use tracing::{debug, info, warn};

use crate::data::FetchError;
use crate::models::{AttemptId, Question, QuizProgress, SessionState, UserDetails};

pub struct App {
    pub state: SessionState,
    user: Option<UserDetails>,
    notice: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: SessionState::default(),
            user: None,
            notice: None,
        }
    }

    pub fn user(&self) -> Option<&UserDetails> {
        self.user.as_ref()
    }

    /// Blocking notification shown over the current view.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn type_char(&mut self, c: char) {
        if let SessionState::Intake(form) = &mut self.state {
            form.push(c);
        }
    }

    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.type_char(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let SessionState::Intake(form) = &mut self.state {
            form.pop();
        }
    }

    pub fn toggle_field(&mut self) {
        if let SessionState::Intake(form) = &mut self.state {
            form.toggle_focus();
        }
    }

    /// Validate the intake form. On success the session moves to `Loading`
    /// and the returned attempt must be fetched by the caller.
    pub fn submit_intake(&mut self) -> Option<AttemptId> {
        let SessionState::Intake(form) = &self.state else {
            return None;
        };

        match UserDetails::parse(&form.name, &form.email) {
            Ok(user) => {
                let attempt = AttemptId::new();
                info!(%attempt, name = %user.name, "starting quiz");
                self.user = Some(user);
                self.notice = None;
                self.state = SessionState::Loading { attempt };
                Some(attempt)
            }
            Err(e) => {
                debug!(error = %e, "intake rejected");
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    /// Apply the outcome of a fetch. Results for any attempt other than the
    /// one currently loading are dropped.
    pub fn finish_loading(
        &mut self,
        attempt: AttemptId,
        result: Result<Vec<Question>, FetchError>,
    ) {
        match &self.state {
            SessionState::Loading { attempt: current } if *current == attempt => {}
            _ => {
                debug!(%attempt, state = self.state.name(), "discarding stale fetch result");
                return;
            }
        }

        self.state = match result {
            Ok(questions) => match QuizProgress::new(questions) {
                Some(progress) => {
                    info!(%attempt, total = progress.total_questions(), "quiz in progress");
                    SessionState::InProgress(progress)
                }
                None => error_state(attempt, FetchError::NoQuestions),
            },
            Err(e) => error_state(attempt, e),
        };
    }

    pub fn select_next_option(&mut self) {
        if let SessionState::InProgress(progress) = &mut self.state {
            progress.select_next_option();
        }
    }

    pub fn select_previous_option(&mut self) {
        if let SessionState::InProgress(progress) = &mut self.state {
            progress.select_previous_option();
        }
    }

    /// Answer the current question with the 0-based option. Ignored once the
    /// question is locked.
    pub fn choose_option(&mut self, position: usize) {
        if let SessionState::InProgress(progress) = &mut self.state {
            if let Some(is_correct) = progress.answer(position) {
                debug!(
                    question = progress.current_question_number(),
                    position,
                    is_correct,
                    score = progress.score(),
                    "answered"
                );
            }
        }
    }

    pub fn choose_selected(&mut self) {
        if let SessionState::InProgress(progress) = &self.state {
            let position = progress.selected_option();
            self.choose_option(position);
        }
    }

    /// Inert until the current question is answered; after the last question
    /// shows the result.
    pub fn next_question(&mut self) {
        let SessionState::InProgress(progress) = &mut self.state else {
            return;
        };
        if !progress.is_locked() {
            return;
        }
        if progress.advance() {
            return;
        }

        let previous = std::mem::take(&mut self.state);
        if let SessionState::InProgress(progress) = previous {
            let summary = progress.finish();
            info!(score = summary.score, total = summary.total, "quiz finished");
            self.state = SessionState::Result(summary);
        }
    }

    pub fn scroll_results_down(&mut self) {
        if let SessionState::Result(summary) = &mut self.state {
            summary.scroll_down();
        }
    }

    pub fn scroll_results_up(&mut self) {
        if let SessionState::Result(summary) = &mut self.state {
            summary.scroll_up();
        }
    }

    /// Back to an empty intake form, dropping everything from the session.
    pub fn reset(&mut self) {
        debug!(from = self.state.name(), "reset");
        self.state = SessionState::default();
        self.user = None;
        self.notice = None;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn error_state(attempt: AttemptId, error: FetchError) -> SessionState {
    warn!(%attempt, error = %error, "failed to load questions");
    SessionState::Error {
        reason: error.to_string(),
    }
}
