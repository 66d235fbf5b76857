use crate::i18n::LanguageCode;
use crate::settings::ConfigFile;
use crate::source::{ConfiguredSource, FsLocaleSource, HttpLocaleSource};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Locale source
    pub locales_dir: PathBuf,
    pub locales_url: Option<String>,

    // Persisted preference
    pub language_config_dir: PathBuf,

    // Language used when nothing has been persisted yet
    pub default_language: LanguageCode,

    // None disables the load timeout
    pub load_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_language = std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string());

        Ok(Self {
            locales_dir: std::env::var("LOCALES_DIR")
                .unwrap_or_else(|_| "locales".to_string())
                .into(),
            locales_url: std::env::var("LOCALES_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),

            language_config_dir: std::env::var("LANGUAGE_CONFIG_DIR")
                .unwrap_or_else(|_| "save".to_string())
                .into(),

            default_language: LanguageCode::new(default_language.as_str())
                .with_context(|| format!("DEFAULT_LANGUAGE '{}' is invalid", default_language))?,

            load_timeout: match std::env::var("LOAD_TIMEOUT_SECS") {
                Ok(raw) => {
                    let secs: u64 = raw
                        .parse()
                        .with_context(|| format!("LOAD_TIMEOUT_SECS '{}' is not a number", raw))?;
                    (secs > 0).then_some(Duration::from_secs(secs))
                }
                Err(_) => Some(Duration::from_secs(10)),
            },
        })
    }

    /// HTTP when `LOCALES_URL` is set, otherwise the locales directory.
    pub fn locale_source(&self) -> ConfiguredSource {
        match &self.locales_url {
            Some(url) => ConfiguredSource::Http(HttpLocaleSource::new(url.clone())),
            None => ConfiguredSource::Fs(FsLocaleSource::new(self.locales_dir.clone())),
        }
    }

    pub fn config_file(&self) -> ConfigFile {
        ConfigFile::in_dir(&self.language_config_dir)
    }
}
