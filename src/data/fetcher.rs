use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::models::{Question, RawQuestion};

const QUESTIONS_PATH: &str = "questions";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to fetch: {status_text}")]
    Status { status: u16, status_text: String },
    #[error("Malformed question data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("No questions found from the API.")]
    NoQuestions,
}

/// HTTP client for the questions endpoint.
#[derive(Debug, Clone)]
pub struct QuestionClient {
    http: Client,
    base_url: Url,
}

impl QuestionClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(base_url, http))
    }

    /// Use a preconfigured `reqwest::Client`.
    pub fn with_http(base_url: Url, http: Client) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base-url>/questions`, tolerating a trailing slash on the base.
    pub fn questions_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            QUESTIONS_PATH
        )
    }

    /// Fetch and normalize the question set.
    pub async fn fetch_questions(&self) -> Result<Vec<Question>, FetchError> {
        let url = self.questions_url();
        debug!(%url, "fetching questions");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status_text(status),
            });
        }

        let body = response.text().await?;
        let records: Vec<Value> = serde_json::from_str(&body)?;
        let received = records.len();
        let questions = normalize_all(records);
        info!(received, usable = questions.len(), "questions fetched");

        if questions.is_empty() {
            return Err(FetchError::NoQuestions);
        }
        Ok(questions)
    }
}

/// Keeps every record that decodes and normalizes, in order. A bad record
/// never costs the others.
pub fn normalize_all(records: Vec<Value>) -> Vec<Question> {
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match RawQuestion::parse_record(record) {
            Ok(question) => Some(question),
            Err(e) => {
                warn!(index, error = %e, "skipping question record");
                None
            }
        })
        .collect()
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_url_joins_base() {
        let timeout = Duration::from_secs(1);
        let client =
            QuestionClient::new(Url::parse("http://quiz.local:5000").unwrap(), timeout).unwrap();
        assert_eq!(client.questions_url(), "http://quiz.local:5000/questions");

        let client =
            QuestionClient::new(Url::parse("http://quiz.local/api/").unwrap(), timeout).unwrap();
        assert_eq!(client.questions_url(), "http://quiz.local/api/questions");
    }

    #[test]
    fn test_status_text_falls_back_to_code() {
        assert_eq!(status_text(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(status_text(StatusCode::from_u16(599).unwrap()), "599");
    }

    #[test]
    fn test_normalize_all_skips_invalid_records() {
        let records: Vec<Value> = serde_json::from_str(
            r#"[
                {"question": "ok", "option1": "a", "option2": "b", "ans": 1},
                {"question": "bad", "option1": "a", "option2": "b", "ans": 4},
                {"question": "negative", "option1": "a", "option2": "b", "ans": -1},
                {"question": "typed", "option1": 4, "option2": "b", "ans": 2},
                {"question": "also ok", "option1": "a", "option3": "c", "ans": 3}
            ]"#,
        )
        .unwrap();
        let questions = normalize_all(records);
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].text, "ok");
        assert_eq!(questions[1].text, "also ok");
        assert_eq!(questions[1].answer, 2);
    }

    #[test]
    fn test_fetch_error_messages() {
        let err = FetchError::Status {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch: Service Unavailable");
        assert_eq!(
            FetchError::NoQuestions.to_string(),
            "No questions found from the API."
        );
    }
}
