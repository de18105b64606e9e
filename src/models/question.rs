use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Number of option slots the questions API exposes per record.
pub const OPTION_SLOTS: usize = 4;

/// Fewest options a question can be asked with.
pub const MIN_OPTIONS: usize = 2;

/// A question record as served by `GET /questions`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
    #[serde(default)]
    pub option4: Option<String>,
    /// 1-based slot of the correct option.
    #[serde(deserialize_with = "slot_number")]
    pub ans: usize,
}

/// A question ready to be asked: only present options, answer re-indexed
/// against them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
    /// 1-based position of the correct entry in `options`.
    pub answer: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuestion {
    #[error("answer slot {0} is outside 1..=4")]
    AnswerOutOfRange(usize),
    #[error("answer slot {0} has no option")]
    AnswerSlotEmpty(usize),
    #[error("only {0} option(s), need at least 2")]
    TooFewOptions(usize),
    #[error("malformed record: {0}")]
    Malformed(String),
}

impl RawQuestion {
    /// Decode one element of the `/questions` array and normalize it.
    pub fn parse_record(value: Value) -> Result<Question, InvalidQuestion> {
        let raw: RawQuestion = serde_json::from_value(value)
            .map_err(|e| InvalidQuestion::Malformed(e.to_string()))?;
        raw.normalize()
    }

    /// Drops the empty slots and re-indexes the answer so it keeps pointing
    /// at the same option text.
    pub fn normalize(self) -> Result<Question, InvalidQuestion> {
        let RawQuestion {
            question: text,
            option1,
            option2,
            option3,
            option4,
            ans,
        } = self;
        if !(1..=OPTION_SLOTS).contains(&ans) {
            return Err(InvalidQuestion::AnswerOutOfRange(ans));
        }

        let slots = [option1, option2, option3, option4];
        if slots[ans - 1].is_none() {
            return Err(InvalidQuestion::AnswerSlotEmpty(ans));
        }

        let answer = slots[..ans - 1].iter().filter(|slot| slot.is_some()).count() + 1;
        let options: Vec<String> = slots.into_iter().flatten().collect();
        if options.len() < MIN_OPTIONS {
            return Err(InvalidQuestion::TooFewOptions(options.len()));
        }

        Ok(Question {
            text,
            options,
            answer,
        })
    }
}

impl Question {
    /// Whether the 0-based option position is the correct one.
    pub fn is_correct(&self, position: usize) -> bool {
        position + 1 == self.answer
    }

    /// 0-based position of the correct option.
    pub fn answer_position(&self) -> usize {
        self.answer - 1
    }
}

/// Some backends serialize `ans` as a string.
fn slot_number<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(usize),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}
