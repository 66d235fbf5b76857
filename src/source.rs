//! Where locale files come from.
//!
//! A game ships its locales either next to the executable (`locales/` on
//! disk) or beside a web build, where they are fetched over HTTP. Both sides
//! implement [`LocaleSource`]; the store only ever sees the trait.

use crate::error::{DirectoryAccessError, FetchError};
use crate::i18n::LanguageCode;
use crate::retry::{with_retry_if, RetryConfig};
use reqwest::StatusCode;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Name of the JSON array listing the languages an HTTP locale root serves.
pub const INDEX_FILE_NAME: &str = "index.json";

/// Supplies locale bodies and enumerates available languages.
pub trait LocaleSource: Send + Sync {
    /// Fetch the raw body of `<language>.json`.
    fn fetch(
        &self,
        language: &LanguageCode,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;

    /// Enumerate the languages this source can serve.
    fn list(&self) -> impl Future<Output = Result<Vec<LanguageCode>, DirectoryAccessError>> + Send;
}

// ==================== Filesystem ====================

/// Locales stored as `<dir>/<code>.json`.
#[derive(Debug, Clone)]
pub struct FsLocaleSource {
    dir: PathBuf,
}

impl FsLocaleSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn directory_error(&self, source: std::io::Error) -> DirectoryAccessError {
        DirectoryAccessError::Io {
            path: self.dir.clone(),
            source,
        }
    }
}

impl LocaleSource for FsLocaleSource {
    async fn fetch(&self, language: &LanguageCode) -> Result<String, FetchError> {
        let path = self.dir.join(language.resource_name());
        match fs::read_to_string(&path).await {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(FetchError::NotFound),
            Err(e) => Err(FetchError::Transport(format!("{}: {}", path.display(), e))),
        }
    }

    /// Every regular `*.json` file whose stem is a valid language code,
    /// sorted by code.
    async fn list(&self) -> Result<Vec<LanguageCode>, DirectoryAccessError> {
        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| self.directory_error(e))?;

        let mut languages = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| self.directory_error(e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            // Follows symlinks, unlike DirEntry::file_type
            match fs::metadata(&path).await {
                Ok(metadata) if metadata.is_file() => {}
                _ => continue,
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            match LanguageCode::new(stem) {
                Ok(code) => languages.push(code),
                Err(e) => debug!("Skipping {}: {}", path.display(), e),
            }
        }

        languages.sort();
        Ok(languages)
    }
}

// ==================== HTTP ====================

/// Locales served as `<base_url>/<code>.json`, with `<base_url>/index.json`
/// listing the available codes.
#[derive(Debug, Clone)]
pub struct HttpLocaleSource {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl HttpLocaleSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            retry: RetryConfig::locale_fetch(),
        }
    }

    /// Override the retry policy used for every request.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), resource)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

impl LocaleSource for HttpLocaleSource {
    async fn fetch(&self, language: &LanguageCode) -> Result<String, FetchError> {
        let url = self.url_for(&language.resource_name());
        with_retry_if(
            &self.retry,
            &format!("Fetch locale {}", language),
            || self.get_text(&url),
            FetchError::is_retryable,
        )
        .await
    }

    async fn list(&self) -> Result<Vec<LanguageCode>, DirectoryAccessError> {
        let url = self.url_for(INDEX_FILE_NAME);
        let body = with_retry_if(
            &self.retry,
            "Fetch locale index",
            || self.get_text(&url),
            FetchError::is_retryable,
        )
        .await
        .map_err(|e| DirectoryAccessError::Http {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        let codes: Vec<String> =
            serde_json::from_str(&body).map_err(|e| DirectoryAccessError::Http {
                url: url.clone(),
                reason: format!("index is not a JSON array of strings: {}", e),
            })?;

        Ok(codes
            .into_iter()
            .filter_map(|raw| match LanguageCode::new(raw) {
                Ok(code) => Some(code),
                Err(e) => {
                    debug!("Skipping index entry from {}: {}", url, e);
                    None
                }
            })
            .collect())
    }
}

// ==================== Runtime selection ====================

/// The source picked from configuration at startup.
#[derive(Debug, Clone)]
pub enum ConfiguredSource {
    Fs(FsLocaleSource),
    Http(HttpLocaleSource),
}

impl LocaleSource for ConfiguredSource {
    async fn fetch(&self, language: &LanguageCode) -> Result<String, FetchError> {
        match self {
            ConfiguredSource::Fs(source) => source.fetch(language).await,
            ConfiguredSource::Http(source) => source.fetch(language).await,
        }
    }

    async fn list(&self) -> Result<Vec<LanguageCode>, DirectoryAccessError> {
        match self {
            ConfiguredSource::Fs(source) => source.list().await,
            ConfiguredSource::Http(source) => source.list().await,
        }
    }
}
