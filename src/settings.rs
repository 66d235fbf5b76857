//! Persisted language preference.
//!
//! The chosen language lives in `languageConfig.json` inside a host-chosen
//! writable directory, as `{"language":"<code>"}`. It is read once at
//! startup and rewritten whenever a language load succeeds.

use crate::error::{ConfigReadError, PersistError};
use crate::i18n::LanguageCode;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File name of the persisted language config.
pub const CONFIG_FILE_NAME: &str = "languageConfig.json";

/// Persisted language preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub language: LanguageCode,
}

/// Location of the language config on disk.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `languageConfig.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted config.
    ///
    /// # Returns
    /// * `Ok(None)` if the file does not exist
    /// * `Ok(Some(config))` if it parses and names a valid language
    /// * `Err(ConfigReadError)` if it cannot be read or is malformed
    pub async fn read(&self) -> Result<Option<LanguageConfig>, ConfigReadError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No language config at {}", self.path.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigReadError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let config = serde_json::from_str(&content).map_err(|source| ConfigReadError::Malformed {
            path: self.path.clone(),
            source,
        })?;

        Ok(Some(config))
    }

    /// Write `{"language": ...}`, creating the parent directory as needed.
    pub async fn save_language(&self, language: &LanguageCode) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| PersistError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let json = serde_json::to_string(&LanguageConfig {
            language: language.clone(),
        })?;

        fs::write(&self.path, json)
            .await
            .map_err(|source| PersistError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!("Saved language '{}' to {}", language, self.path.display());
        Ok(())
    }
}
