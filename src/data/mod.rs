mod fetcher;

pub use fetcher::{normalize_all, FetchError, QuestionClient};
