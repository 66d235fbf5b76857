//! Error types for the translation store.
//!
//! Every error here is recoverable: a failed load leaves the store untouched,
//! a bad config file is treated as absent, and an unreadable locale directory
//! lists as empty. Callers decide whether to log or surface them.

use crate::i18n::LanguageCode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Raised when a language code fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageCodeError {
    #[error("language code is empty")]
    Empty,

    #[error("language code '{0}' may only contain ASCII letters, digits, '-' and '_'")]
    InvalidCharacters(String),
}

/// What a locale source reports when it cannot hand back a locale body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("locale resource not found")]
    NotFound,

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),
}

impl FetchError {
    /// Transport failures, 429 and 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::NotFound => false,
            FetchError::Status(status) => *status == 429 || *status >= 500,
            FetchError::Transport(_) => true,
        }
    }
}

/// A language load failed. The store state is unchanged.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("locale '{language}' not found")]
    NotFound { language: LanguageCode },

    #[error("failed to fetch locale '{language}': {reason}")]
    Transport {
        language: LanguageCode,
        reason: String,
    },

    #[error("locale '{language}' is not valid JSON: {source}")]
    Malformed {
        language: LanguageCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("locale '{language}' has an invalid shape: {}", .problems.join("; "))]
    InvalidShape {
        language: LanguageCode,
        problems: Vec<String>,
    },

    #[error("loading locale '{language}' timed out after {timeout:?}")]
    Timeout {
        language: LanguageCode,
        timeout: Duration,
    },
}

impl LoadError {
    /// Lift a source-level failure into a load error for `language`.
    pub fn from_fetch(language: LanguageCode, error: FetchError) -> Self {
        match error {
            FetchError::NotFound => LoadError::NotFound { language },
            other => LoadError::Transport {
                language,
                reason: other.to_string(),
            },
        }
    }

    /// The language whose load failed.
    pub fn language(&self) -> &LanguageCode {
        match self {
            LoadError::NotFound { language }
            | LoadError::Transport { language, .. }
            | LoadError::Malformed { language, .. }
            | LoadError::InvalidShape { language, .. }
            | LoadError::Timeout { language, .. } => language,
        }
    }
}

/// The persisted language config exists but could not be used.
#[derive(Debug, Error)]
pub enum ConfigReadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed language config {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writing the language config failed.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to create config directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize language config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The locale directory (or index) could not be enumerated.
#[derive(Debug, Error)]
pub enum DirectoryAccessError {
    #[error("failed to read locale directory {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch locale index {url}: {reason}")]
    Http { url: String, reason: String },
}
