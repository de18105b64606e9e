//! Runtime settings.
//!
//! Layered from lowest to highest precedence: built-in defaults, an optional
//! TOML file, `QUIZ_*` environment variables, then command-line flags (applied
//! by the caller through the `set_*` methods).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_CONFIG_PATH: &str = "quiz.toml";
pub const DEFAULT_LOG_FILE: &str = "quiz-app.log";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_URL: &str = "QUIZ_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "QUIZ_REQUEST_TIMEOUT_SECS";
pub const ENV_LOG_FILE: &str = "QUIZ_LOG_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid API URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("invalid request timeout {0:?}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: Url,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
}

/// Shape of `quiz.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
    log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Load from `path` (or `quiz.toml` if present) and the process
    /// environment. An explicit `path` must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let contents = match fs::read_to_string(&path) {
            Ok(raw) => Some(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => None,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::resolve(contents.as_deref(), &path, |key| std::env::var(key).ok())
    }

    /// Merge file contents and environment lookups over the defaults.
    pub fn resolve<F>(file: Option<&str>, path: &Path, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(raw) = file {
            let file_cfg: FileSettings =
                toml::from_str(raw).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?;
            if let Some(v) = file_cfg.api_url {
                settings.set_api_url(&v)?;
            }
            if let Some(v) = file_cfg.request_timeout_secs {
                settings.set_timeout_secs(v)?;
            }
            if let Some(v) = file_cfg.log_file {
                settings.log_file = v;
            }
        }

        if let Some(v) = env(ENV_API_URL) {
            settings.set_api_url(&v)?;
        }
        if let Some(v) = env(ENV_TIMEOUT_SECS) {
            let secs = v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(v.clone()))?;
            settings.set_timeout_secs(secs)?;
        }
        if let Some(v) = env(ENV_LOG_FILE) {
            settings.log_file = PathBuf::from(v);
        }

        Ok(settings)
    }

    pub fn set_api_url(&mut self, raw: &str) -> Result<(), ConfigError> {
        self.api_url = parse_api_url(raw)?;
        Ok(())
    }

    pub fn set_timeout_secs(&mut self, secs: u64) -> Result<(), ConfigError> {
        if secs == 0 {
            return Err(ConfigError::InvalidTimeout(secs.to_string()));
        }
        self.request_timeout = Duration::from_secs(secs);
        Ok(())
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let raw = raw.trim();
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {other}"),
        }),
    }
}
