//! # quiz-app
//!
//! A terminal quiz client. It asks for a name and email, fetches
//! multiple-choice questions from `<api-url>/questions`, asks them one at a
//! time and shows the final score.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_app::{Quiz, QuizError, Settings};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let settings = Settings::load(None)?;
//!     Quiz::from_settings(&settings)?.run().await
//! }
//! ```

mod app;
pub mod config;
mod data;
mod models;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub use app::App;
pub use config::{ConfigError, Settings};
pub use data::{normalize_all, FetchError, QuestionClient};
pub use models::{
    AnsweredQuestion, AttemptId, Field, IntakeForm, InvalidQuestion, OptionStatus, Question,
    QuizProgress, QuizSummary, RawQuestion, SessionState, UserDetails, ValidationError,
};

/// How long to wait for a key before redrawing.
const TICK: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to set up HTTP client: {0}")]
    Client(#[from] FetchError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

type FetchOutcome = (AttemptId, Result<Vec<Question>, FetchError>);

/// What the event loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Continue,
    Quit,
    Fetch(AttemptId),
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
    client: QuestionClient,
}

impl Quiz {
    pub fn new(client: QuestionClient) -> Self {
        Self {
            app: App::new(),
            client,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, QuizError> {
        let client = QuestionClient::new(settings.api_url.clone(), settings.request_timeout)?;
        Ok(Self::new(client))
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        info!(api_url = %self.client.base_url(), "quiz started");
        let mut term = terminal::init()?;
        let mut pending = None;
        let result = run_event_loop(&mut term, &mut self.app, &self.client, &mut pending).await;
        if let Some(task) = pending.take() {
            task.abort();
        }
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
    client: &QuestionClient,
    pending: &mut Option<JoinHandle<()>>,
) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<FetchOutcome>();

    loop {
        while let Ok((attempt, result)) = rx.try_recv() {
            app.finish_loading(attempt, result);
        }

        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        let control = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => handle_input(app, key),
            Event::Paste(text) => {
                app.type_str(&text);
                Control::Continue
            }
            _ => Control::Continue,
        };

        match control {
            Control::Continue => {}
            Control::Quit => break,
            Control::Fetch(attempt) => {
                let task = spawn_fetch(client.clone(), attempt, tx.clone());
                if let Some(previous) = pending.replace(task) {
                    previous.abort();
                }
            }
        }
    }

    info!("quiz closed");
    Ok(())
}

/// One fetch per attempt; the outcome comes back through `tx`.
fn spawn_fetch(
    client: QuestionClient,
    attempt: AttemptId,
    tx: mpsc::UnboundedSender<FetchOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = client.fetch_questions().await;
        if tx.send((attempt, result)).is_err() {
            debug!(%attempt, "fetch finished after the quiz closed");
        }
    })
}

fn handle_input(app: &mut App, key: KeyEvent) -> Control {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Control::Quit;
    }
    // Ctrl+Alt together is AltGr on some layouts and still types a character.
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    if matches!(key.code, KeyCode::Char(_)) && ctrl != alt {
        return Control::Continue;
    }
    if app.notice().is_some() {
        app.dismiss_notice();
        return Control::Continue;
    }

    match app.state {
        SessionState::Intake(_) => handle_intake_input(app, key.code),
        SessionState::Loading { .. } => handle_loading_input(key.code),
        SessionState::Error { .. } => handle_error_input(app, key.code),
        SessionState::InProgress(_) => handle_quiz_input(app, key.code),
        SessionState::Result(_) => handle_result_input(app, key.code),
    }
}

fn handle_intake_input(app: &mut App, key: KeyCode) -> Control {
    match key {
        KeyCode::Enter => match app.submit_intake() {
            Some(attempt) => Control::Fetch(attempt),
            None => Control::Continue,
        },
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.toggle_field();
            Control::Continue
        }
        KeyCode::Backspace => {
            app.delete_char();
            Control::Continue
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            Control::Continue
        }
        KeyCode::Esc => Control::Quit,
        _ => Control::Continue,
    }
}

fn handle_loading_input(key: KeyCode) -> Control {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Control::Quit,
        _ => Control::Continue,
    }
}

fn handle_error_input(app: &mut App, key: KeyCode) -> Control {
    match key {
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset();
            Control::Continue
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Control::Quit,
        _ => Control::Continue,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Control {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.choose_selected(),
        KeyCode::Char(c @ '1'..='4') => app.choose_option(c as usize - '1' as usize),
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('N') => app.next_question(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Control::Quit,
        _ => {}
    }
    Control::Continue
}

fn handle_result_input(app: &mut App, key: KeyCode) -> Control {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Control::Quit,
        _ => {}
    }
    Control::Continue
}
