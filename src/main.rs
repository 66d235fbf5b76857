//! Command-line host for the translation store.
//!
//! Usage:
//!   translation-store                      # Show the current language
//!   translation-store list                 # List available languages
//!   translation-store translate KEY...     # Translate keys in the current language
//!   translation-store use LANGUAGE         # Switch language and remember it
//!
//! Optional environment variables:
//! - LOCALES_DIR (defaults to locales)
//! - LOCALES_URL (fetch locales over HTTP instead)
//! - LANGUAGE_CONFIG_DIR (defaults to save)
//! - DEFAULT_LANGUAGE (defaults to en)
//! - LOAD_TIMEOUT_SECS (defaults to 10, 0 disables)

use anyhow::{bail, Context, Result};
use tracing::debug;
use translation_store::config::Config;
use translation_store::i18n::{LanguageCode, TranslationStore, LANGUAGE_MENU_KEY};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_store=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    let mut store = TranslationStore::new(
        config.locale_source(),
        config.config_file(),
        config.default_language.clone(),
    );
    if let Some(timeout) = config.load_timeout {
        store = store.with_load_timeout(timeout);
    }
    let store = store.started().await;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("current") => {
            println!(
                "{}: {}",
                store.translate(LANGUAGE_MENU_KEY),
                store.current_language()
            );
        }
        Some("list") => {
            let languages = store.list_available_languages().await;
            if languages.is_empty() {
                println!("No languages found");
            }
            for language in languages {
                let marker = if language == store.current_language() { "*" } else { " " };
                println!("{} {:<8} {}", marker, language, store.translate(language.as_str()));
            }
        }
        Some("translate") => {
            if args.len() < 2 {
                bail!("Usage: translation-store translate KEY...");
            }
            for key in &args[1..] {
                println!("{}", store.translate(key));
            }
        }
        Some("use") => {
            let raw = args
                .get(1)
                .context("Usage: translation-store use LANGUAGE")?;
            let language = LanguageCode::new(raw.as_str())
                .with_context(|| format!("'{}' is not a valid language code", raw))?;

            let loaded = store.load(&language).await?;
            if let Some(e) = &loaded.persist_error {
                eprintln!("Warning: language will not be remembered: {}", e);
            }
            println!(
                "{}: {} ({} keys)",
                store.translate(LANGUAGE_MENU_KEY),
                loaded.language,
                loaded.entries
            );
        }
        Some(other) => bail!("Unknown command '{}' (expected current, list, translate or use)", other),
    }

    debug!("Store metrics: {:?}", store.metrics());
    Ok(())
}
