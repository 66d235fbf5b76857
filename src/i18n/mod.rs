//! Internationalization (i18n) core.
//!
//! Loads key→text maps from JSON locale files, resolves keys against the
//! active language, and remembers the player's choice between sessions.
//!
//! # Architecture
//!
//! - `language`: `LanguageCode`, a validated locale identifier
//! - `translations`: `TranslationMap`, one language's keys and the locale parser
//! - `store`: `TranslationStore`, the active language and all store operations
//! - `validator`: locale shape and completeness checks
//! - `metrics`: per-store lookup and load counters
//!
//! # Example
//!
//! ```rust,ignore
//! use translation_store::i18n::{LanguageCode, TranslationStore};
//! use translation_store::settings::ConfigFile;
//! use translation_store::source::FsLocaleSource;
//!
//! let store = TranslationStore::start(
//!     FsLocaleSource::new("locales"),
//!     ConfigFile::in_dir("save"),
//!     LanguageCode::new("en")?,
//! )
//! .await;
//!
//! println!("{}", store.translate("greeting"));
//! store.load(&LanguageCode::new("ptBR")?).await?;
//! ```

mod language;
mod metrics;
mod store;
mod translations;
mod validator;

pub use language::LanguageCode;
pub use metrics::{MetricsReport, StoreMetrics};
pub use store::{Loaded, TranslationStore, LANGUAGE_MENU_KEY};
pub use translations::TranslationMap;
pub use validator::{LocaleValidator, ValidationReport};
