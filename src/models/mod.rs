mod question;
mod session;
mod user;

pub use question::{InvalidQuestion, Question, RawQuestion};
pub use session::{
    AnsweredQuestion, AttemptId, Field, IntakeForm, OptionStatus, QuizProgress, QuizSummary,
    SessionState,
};
pub use user::{UserDetails, ValidationError};
