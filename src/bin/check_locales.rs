//! Check locales binary - validates every locale file against the default language
//!
//! Usage:
//!   cargo run --bin check-locales
//!
//! Every locale must be a flat JSON object of strings. Locales other than the
//! default are also compared against it for missing and extra keys.
//! Exits non-zero if any locale has errors; warnings are only printed.
//!
//! Optional:
//! - LOCALES_DIR (defaults to locales)
//! - LOCALES_URL (check locales served over HTTP instead)
//! - DEFAULT_LANGUAGE (defaults to en)

use anyhow::{bail, Result};
use tracing::info;
use translation_store::config::Config;
use translation_store::error::LoadError;
use translation_store::i18n::{LocaleValidator, TranslationMap, ValidationReport};
use translation_store::source::LocaleSource;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translation_store=warn".parse()?)
                .add_directive("check_locales=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let source = config.locale_source();
    let reference_code = &config.default_language;

    let languages = source.list().await?;
    info!("Checking {} locale(s)", languages.len());

    let reference = match source.fetch(reference_code).await {
        Ok(body) => TranslationMap::parse(reference_code, &body).ok(),
        Err(_) => None,
    };
    if reference.is_none() {
        println!(
            "! default language '{}' could not be loaded; skipping key comparison",
            reference_code
        );
    }

    let mut failed = 0;
    for language in &languages {
        let mut report = ValidationReport::new();

        match source.fetch(language).await {
            Err(e) => report.errors.push(format!("fetch failed: {}", e)),
            Ok(body) => match serde_json::from_str(&body) {
                Err(e) => report.errors.push(format!("invalid JSON: {}", e)),
                Ok(document) => {
                    report.merge(LocaleValidator::validate_shape(&document));
                    match (&reference, TranslationMap::parse(language, &body)) {
                        (Some(reference), Ok(candidate)) if language != reference_code => {
                            report.merge(LocaleValidator::compare(reference, &candidate));
                        }
                        (_, Err(LoadError::InvalidShape { .. })) | (_, Ok(_)) => {}
                        (_, Err(e)) => report.errors.push(e.to_string()),
                    }
                }
            },
        }

        print_report(language.as_str(), &report);
        if report.has_errors() {
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} of {} locale(s) have errors", failed, languages.len());
    }
    println!("All {} locale(s) are valid", languages.len());
    Ok(())
}

fn print_report(language: &str, report: &ValidationReport) {
    if report.is_clean() {
        println!("✓ {}", language);
        return;
    }

    let status = if report.has_errors() { "✗" } else { "~" };
    println!("{} {}", status, language);
    for error in &report.errors {
        println!("    error: {}", error);
    }
    for warning in &report.warnings {
        println!("    warning: {}", warning);
    }
}
