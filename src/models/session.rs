//! Session state for a single quiz attempt.

use std::fmt;

use uuid::Uuid;

use super::question::Question;

/// Longest name the intake form accepts.
pub const NAME_MAX_LENGTH: usize = 40;
/// Longest email the intake form accepts.
pub const EMAIL_MAX_LENGTH: usize = 64;

/// Identifies one Intake -> Loading submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the user is in the quiz.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Entering name and email.
    Intake(IntakeForm),

    /// Waiting for the questions of `attempt`.
    Loading { attempt: AttemptId },

    /// Fetching failed.
    Error { reason: String },

    /// Answering questions.
    InProgress(QuizProgress),

    /// Quiz finished.
    Result(QuizSummary),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Intake(IntakeForm::default())
    }
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Intake(_) => "intake",
            Self::Loading { .. } => "loading",
            Self::Error { .. } => "error",
            Self::InProgress(_) => "in_progress",
            Self::Result(_) => "result",
        }
    }
}

/// Intake form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Name,
    Email,
}

impl Field {
    pub fn toggle(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Name,
        }
    }

    fn max_length(self) -> usize {
        match self {
            Self::Name => NAME_MAX_LENGTH,
            Self::Email => EMAIL_MAX_LENGTH,
        }
    }
}

/// Raw text typed into the intake form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeForm {
    pub name: String,
    pub email: String,
    pub focus: Field,
}

impl IntakeForm {
    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
        }
    }

    /// Append a character to the focused field, up to its length cap.
    pub fn push(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let max = self.focus.max_length();
        let input = self.focused_mut();
        if input.chars().count() < max {
            input.push(c);
        }
    }

    pub fn pop(&mut self) {
        self.focused_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }
}

/// Visual mark of one option after the question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionStatus {
    Unmarked,
    Correct,
    Wrong,
}

/// Outcome of one question, kept for the result breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsweredQuestion {
    pub text: String,
    pub is_correct: bool,
}

/// Running quiz over the fetched questions.
#[derive(Debug, Clone)]
pub struct QuizProgress {
    questions: Vec<Question>,
    index: usize,
    /// 0-based option picked for the current question. `Some` locks it.
    answered: Option<usize>,
    score: usize,
    selected: usize,
    history: Vec<AnsweredQuestion>,
}

impl QuizProgress {
    /// Returns `None` for an empty question list.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        Some(Self {
            questions,
            index: 0,
            answered: None,
            score: 0,
            selected: 0,
            history: Vec::new(),
        })
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.index]
    }

    pub fn current_question_number(&self) -> usize {
        self.index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_locked(&self) -> bool {
        self.answered.is_some()
    }

    pub fn is_last_question(&self) -> bool {
        self.index + 1 == self.questions.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected
    }

    pub fn select_next_option(&mut self) {
        let count = self.current_question().options.len();
        self.selected = (self.selected + 1) % count;
    }

    pub fn select_previous_option(&mut self) {
        let count = self.current_question().options.len();
        self.selected = (self.selected + count - 1) % count;
    }

    /// Answer the current question. Returns whether the answer counted and
    /// was correct; `None` when locked or out of range.
    pub fn answer(&mut self, position: usize) -> Option<bool> {
        if self.is_locked() || position >= self.current_question().options.len() {
            return None;
        }

        let question = self.current_question();
        let is_correct = question.is_correct(position);
        let record = AnsweredQuestion {
            text: question.text.clone(),
            is_correct,
        };

        self.answered = Some(position);
        self.selected = position;
        if is_correct {
            self.score += 1;
        }
        self.history.push(record);
        Some(is_correct)
    }

    /// Mark for the 0-based option of the current question.
    pub fn option_status(&self, position: usize) -> OptionStatus {
        let Some(chosen) = self.answered else {
            return OptionStatus::Unmarked;
        };
        if self.current_question().is_correct(position) {
            OptionStatus::Correct
        } else if position == chosen {
            OptionStatus::Wrong
        } else {
            OptionStatus::Unmarked
        }
    }

    /// Move to the next question and clear the lock. `false` when unlocked
    /// or already on the last question.
    pub fn advance(&mut self) -> bool {
        if !self.is_locked() || self.is_last_question() {
            return false;
        }
        self.index += 1;
        self.answered = None;
        self.selected = 0;
        true
    }

    pub fn finish(self) -> QuizSummary {
        QuizSummary::new(self.score, self.questions.len(), self.history)
    }
}

/// Final score screen.
#[derive(Debug, Clone)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub answers: Vec<AnsweredQuestion>,
    pub scroll: usize,
}

impl QuizSummary {
    pub fn new(score: usize, total: usize, answers: Vec<AnsweredQuestion>) -> Self {
        Self {
            score,
            total,
            answers,
            scroll: 0,
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.score as f64 / self.total as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn scroll_down(&mut self) {
        let max_scroll = self.answers.len().saturating_sub(1);
        self.scroll = (self.scroll + 1).min(max_scroll);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, options: &[&str], answer: usize) -> Question {
        Question {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
        }
    }

    #[test]
    fn test_progress_rejects_empty_list() {
        assert!(QuizProgress::new(Vec::new()).is_none());
    }

    #[test]
    fn test_option_status_after_wrong_answer() {
        let mut progress = QuizProgress::new(vec![question("q", &["a", "b", "c"], 2)]).unwrap();
        assert_eq!(progress.option_status(1), OptionStatus::Unmarked);

        assert_eq!(progress.answer(2), Some(false));
        assert_eq!(progress.option_status(0), OptionStatus::Unmarked);
        assert_eq!(progress.option_status(1), OptionStatus::Correct);
        assert_eq!(progress.option_status(2), OptionStatus::Wrong);
    }

    #[test]
    fn test_option_status_after_correct_answer() {
        let mut progress = QuizProgress::new(vec![question("q", &["a", "b"], 1)]).unwrap();
        assert_eq!(progress.answer(0), Some(true));
        assert_eq!(progress.option_status(0), OptionStatus::Correct);
        assert_eq!(progress.option_status(1), OptionStatus::Unmarked);
    }

    #[test]
    fn test_answer_out_of_range_is_ignored() {
        let mut progress = QuizProgress::new(vec![question("q", &["a", "b"], 1)]).unwrap();
        assert_eq!(progress.answer(3), None);
        assert!(!progress.is_locked());
    }

    #[test]
    fn test_selection_wraps_by_option_count() {
        let mut progress = QuizProgress::new(vec![question("q", &["a", "b", "c"], 1)]).unwrap();
        progress.select_previous_option();
        assert_eq!(progress.selected_option(), 2);
        progress.select_next_option();
        assert_eq!(progress.selected_option(), 0);
    }

    #[test]
    fn test_intake_form_caps_length() {
        let mut form = IntakeForm::default();
        for _ in 0..NAME_MAX_LENGTH + 5 {
            form.push('x');
        }
        assert_eq!(form.name.chars().count(), NAME_MAX_LENGTH);

        form.toggle_focus();
        form.push('a');
        form.push('\n');
        assert_eq!(form.email, "a");
        form.pop();
        assert!(form.email.is_empty());
    }

    #[test]
    fn test_summary_scroll_bounds() {
        let answers = vec![
            AnsweredQuestion {
                text: "one".to_string(),
                is_correct: true,
            },
            AnsweredQuestion {
                text: "two".to_string(),
                is_correct: false,
            },
        ];
        let mut summary = QuizSummary::new(1, 2, answers);
        summary.scroll_up();
        assert_eq!(summary.scroll, 0);
        summary.scroll_down();
        summary.scroll_down();
        assert_eq!(summary.scroll, 1);
        assert_eq!(summary.percentage(), 50.0);
    }
}
