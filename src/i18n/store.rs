//! The translation store: active language, its translations, and the
//! persisted language preference.
//!
//! A store is an owned value. Hosts hold it (or an `Arc` of it) and pass it
//! to whatever needs text; there is no process-wide instance.
//!
//! Lookups never fail: a key with no translation comes back unchanged, so UI
//! code always has something to display.
//!
//! Loads are serialized. Each one fetches and parses the whole locale before
//! touching the store, then swaps language and translations in a single
//! assignment. A failed load leaves the previous language in place, and two
//! racing loads can never leave keys from both languages visible.

use crate::error::{ConfigReadError, LoadError, PersistError};
use crate::i18n::{LanguageCode, MetricsReport, StoreMetrics, TranslationMap};
use crate::settings::{ConfigFile, LanguageConfig};
use crate::source::LocaleSource;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Key hosts use to label their language menu entry.
pub const LANGUAGE_MENU_KEY: &str = "language";

#[derive(Debug, Clone)]
struct StoreState {
    language: LanguageCode,
    translations: Arc<TranslationMap>,
}

/// Outcome of a successful [`TranslationStore::load`].
#[derive(Debug)]
pub struct Loaded {
    pub language: LanguageCode,

    /// Number of keys in the new translation map
    pub entries: usize,

    /// Set when the language loaded but could not be saved as the preference
    pub persist_error: Option<PersistError>,
}

/// Holds the current language and resolves keys against it.
pub struct TranslationStore<S> {
    source: S,
    config_file: ConfigFile,
    state: RwLock<StoreState>,
    load_gate: Mutex<()>,
    load_timeout: Option<Duration>,
    metrics: StoreMetrics,
}

impl<S: LocaleSource> TranslationStore<S> {
    /// Create a store with `default_language` and no translations loaded.
    ///
    /// Performs no I/O. Most hosts want [`TranslationStore::start`] instead.
    pub fn new(source: S, config_file: ConfigFile, default_language: LanguageCode) -> Self {
        Self {
            source,
            config_file,
            state: RwLock::new(StoreState {
                language: default_language,
                translations: Arc::new(TranslationMap::new()),
            }),
            load_gate: Mutex::new(()),
            load_timeout: None,
            metrics: StoreMetrics::new(),
        }
    }

    /// Bound how long fetching a locale may take.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }

    /// Create a store and run the startup sequence.
    ///
    /// The persisted language wins over `default_language` when present and
    /// readable. The chosen language is then loaded; if that fails the store
    /// is still returned, with no translations, and every lookup falls back
    /// to its key.
    pub async fn start(source: S, config_file: ConfigFile, default_language: LanguageCode) -> Self {
        Self::new(source, config_file, default_language).started().await
    }

    /// Run the startup sequence on a store built with [`TranslationStore::new`].
    pub async fn started(self) -> Self {
        match self.get_config().await {
            Ok(Some(config)) => {
                info!("Using persisted language '{}'", config.language);
                self.replace_language(config.language);
            }
            Ok(None) => debug!(
                "No persisted language, using default '{}'",
                self.current_language()
            ),
            Err(e) => warn!("Ignoring unreadable language config: {}", e),
        }

        let language = self.current_language();
        if let Err(e) = self.load(&language).await {
            warn!("Initial language load failed, falling back to keys: {}", e);
        }

        self
    }

    /// Load `language` and make it current.
    ///
    /// # Arguments
    /// * `language` - Language to fetch from the locale source
    ///
    /// # Returns
    /// * `Ok(Loaded)` once the store has switched; the language was also
    ///   saved as the preference unless `persist_error` says otherwise
    /// * `Err(LoadError)` if the locale could not be fetched or parsed; the
    ///   store is unchanged
    pub async fn load(&self, language: &LanguageCode) -> Result<Loaded, LoadError> {
        let _gate = self.load_gate.lock().await;
        self.metrics.record_load();

        let translations = match self.fetch_translations(language).await {
            Ok(translations) => translations,
            Err(e) => {
                self.metrics.record_load_failure();
                warn!("Could not load language '{}': {}", language, e);
                return Err(e);
            }
        };

        let entries = translations.len();
        self.replace_state(StoreState {
            language: language.clone(),
            translations: Arc::new(translations),
        });
        info!("Loaded language '{}' ({} keys)", language, entries);

        let persist_error = match self.config_file.save_language(language).await {
            Ok(()) => None,
            Err(e) => {
                warn!("Loaded '{}' but could not save it: {}", language, e);
                Some(e)
            }
        };

        Ok(Loaded {
            language: language.clone(),
            entries,
            persist_error,
        })
    }

    async fn fetch_translations(&self, language: &LanguageCode) -> Result<TranslationMap, LoadError> {
        let fetched = match self.load_timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.source.fetch(language))
                .await
                .map_err(|_| LoadError::Timeout {
                    language: language.clone(),
                    timeout,
                })?,
            None => self.source.fetch(language).await,
        };

        let body = fetched.map_err(|e| LoadError::from_fetch(language.clone(), e))?;
        TranslationMap::parse(language, &body)
    }

    /// Resolve `key` against the current language, or return `key` itself.
    ///
    /// An empty translation counts as missing, so the result is never empty
    /// unless `key` is.
    pub fn translate(&self, key: &str) -> String {
        let translations = self.translations();
        let text = translations.get(key).filter(|text| !text.is_empty());
        self.metrics.record_lookup(text.is_some());
        text.unwrap_or(key).to_string()
    }

    pub fn current_language(&self) -> LanguageCode {
        self.read_state().language.clone()
    }

    /// Snapshot of the active translations.
    pub fn translations(&self) -> Arc<TranslationMap> {
        Arc::clone(&self.read_state().translations)
    }

    /// Languages the locale source can serve; empty if it cannot be listed.
    pub async fn list_available_languages(&self) -> Vec<LanguageCode> {
        match self.source.list().await {
            Ok(languages) => languages,
            Err(e) => {
                warn!("Could not list available languages: {}", e);
                Vec::new()
            }
        }
    }

    /// Available languages passed through [`TranslationStore::translate`], so
    /// a locale can carry display names keyed by language code.
    pub async fn list_available_languages_translated(&self) -> Vec<String> {
        self.list_available_languages()
            .await
            .iter()
            .map(|language| self.translate(language.as_str()))
            .collect()
    }

    pub async fn get_config(&self) -> Result<Option<LanguageConfig>, ConfigReadError> {
        self.config_file.read().await
    }

    /// Persist `language` as the preference without loading it.
    pub async fn save_language(&self, language: &LanguageCode) -> Result<(), PersistError> {
        self.config_file.save_language(language).await
    }

    pub fn config_file(&self) -> &ConfigFile {
        &self.config_file
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace_state(&self, next: StoreState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    // Only valid while no translations are loaded (startup).
    fn replace_language(&self, language: LanguageCode) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .language = language;
    }
}
