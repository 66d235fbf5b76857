//! Integration tests for the translation store
//!
//! These tests drive the public API the way a host would: real locale files
//! in a temporary directory (or a mock HTTP server), a real config file, and
//! fresh store instances standing in for separate game sessions.

use proptest::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use translation_store::error::LoadError;
use translation_store::i18n::{LanguageCode, TranslationStore, LANGUAGE_MENU_KEY};
use translation_store::retry::RetryConfig;
use translation_store::settings::{ConfigFile, CONFIG_FILE_NAME};
use translation_store::source::{FsLocaleSource, HttpLocaleSource};

// ==================== Test Helpers ====================

fn code(s: &str) -> LanguageCode {
    LanguageCode::new(s).expect("valid language code")
}

/// Game directory with `locales/en.json` and `locales/ptBR.json`
fn create_game_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let locales = dir.path().join("locales");
    std::fs::create_dir(&locales).expect("Failed to create locales dir");
    std::fs::write(locales.join("en.json"), r#"{"greeting":"Hello","language":"Language"}"#)
        .expect("Failed to write en.json");
    std::fs::write(locales.join("ptBR.json"), r#"{"greeting":"Olá","language":"Idioma"}"#)
        .expect("Failed to write ptBR.json");
    dir
}

/// One game session: a store started from the game directory.
async fn start_session(dir: &Path) -> TranslationStore<FsLocaleSource> {
    TranslationStore::start(
        FsLocaleSource::new(dir.join("locales")),
        ConfigFile::in_dir(dir.join("save")),
        code("en"),
    )
    .await
}

// ==================== Scenario Tests ====================

#[tokio::test]
async fn test_startup_then_switch_language() {
    let dir = create_game_dir();
    let store = start_session(dir.path()).await;

    assert_eq!(store.current_language(), code("en"));
    assert_eq!(store.translate("greeting"), "Hello");

    store.load(&code("ptBR")).await.expect("ptBR should load");
    assert_eq!(store.translate("greeting"), "Olá");

    let raw = std::fs::read_to_string(dir.path().join("save").join(CONFIG_FILE_NAME))
        .expect("config should be written");
    let saved: serde_json::Value = serde_json::from_str(&raw).expect("config should be JSON");
    assert_eq!(saved, serde_json::json!({ "language": "ptBR" }));
}

#[tokio::test]
async fn test_loading_missing_language_changes_nothing() {
    let dir = create_game_dir();
    let store = start_session(dir.path()).await;
    let before = store.translate("greeting");

    let err = store.load(&code("missing")).await.unwrap_err();

    assert!(matches!(err, LoadError::NotFound { .. }));
    assert_eq!(err.language(), &code("missing"));
    assert_eq!(store.current_language(), code("en"));
    assert_eq!(store.translate("greeting"), before);
}

#[tokio::test]
async fn test_unknown_key_returns_key() {
    let dir = create_game_dir();
    let store = start_session(dir.path()).await;
    assert_eq!(store.translate("unknown_key"), "unknown_key");
}

#[tokio::test]
async fn test_empty_translation_falls_back_to_key() {
    let dir = TempDir::new().unwrap();
    let locales = dir.path().join("locales");
    std::fs::create_dir(&locales).unwrap();
    std::fs::write(locales.join("en.json"), r#"{"farewell":"","greeting":"Hello"}"#).unwrap();

    let store = start_session(dir.path()).await;

    assert_eq!(store.current_language(), code("en"));
    assert_eq!(store.translate("farewell"), "farewell");
    assert_eq!(store.translate("greeting"), "Hello");
}

#[tokio::test]
async fn test_menu_label_follows_language() {
    let dir = create_game_dir();
    let store = start_session(dir.path()).await;
    assert_eq!(store.translate(LANGUAGE_MENU_KEY), "Language");

    store.load(&code("ptBR")).await.unwrap();
    assert_eq!(store.translate(LANGUAGE_MENU_KEY), "Idioma");
}

// ==================== Persistence Tests ====================

#[tokio::test]
async fn test_saved_language_survives_restart() {
    let dir = create_game_dir();

    let first = start_session(dir.path()).await;
    first.save_language(&code("ptBR")).await.expect("Should save");
    drop(first);

    let second = start_session(dir.path()).await;
    assert_eq!(second.current_language(), code("ptBR"));
    assert_eq!(second.translate("greeting"), "Olá");
}

#[tokio::test]
async fn test_loaded_language_survives_restart() {
    let dir = create_game_dir();

    let first = start_session(dir.path()).await;
    first.load(&code("ptBR")).await.unwrap();
    drop(first);

    let second = start_session(dir.path()).await;
    assert_eq!(second.current_language(), code("ptBR"));
}

#[tokio::test]
async fn test_get_config_absent_before_any_save() {
    let dir = create_game_dir();
    let store = TranslationStore::new(
        FsLocaleSource::new(dir.path().join("locales")),
        ConfigFile::in_dir(dir.path().join("save")),
        code("en"),
    );
    assert!(store.get_config().await.unwrap().is_none());
}

// ==================== Listing Tests ====================

#[tokio::test]
async fn test_list_available_languages_matches_files() {
    let dir = create_game_dir();
    let store = start_session(dir.path()).await;

    let found: HashSet<LanguageCode> = store.list_available_languages().await.into_iter().collect();
    let expected: HashSet<LanguageCode> = [code("en"), code("ptBR")].into_iter().collect();
    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_list_translated_falls_back_to_codes() {
    let dir = create_game_dir();
    let store = start_session(dir.path()).await;

    // The test locales carry no display names, so codes come back as-is
    let names: HashSet<String> = store
        .list_available_languages_translated()
        .await
        .into_iter()
        .collect();
    let expected: HashSet<String> = ["en", "ptBR"].iter().map(|s| s.to_string()).collect();
    assert_eq!(names, expected);
}

// ==================== HTTP Source Tests ====================

#[tokio::test]
async fn test_store_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/locales/en.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"greeting":"Hello"}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locales/ptBR.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"greeting":"Olá"}"#))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/locales/index.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["en","ptBR"]"#))
        .mount(&server)
        .await;

    let save = TempDir::new().unwrap();
    let source = HttpLocaleSource::new(format!("{}/locales", server.uri()))
        .with_retry(RetryConfig::no_retry());
    let store = TranslationStore::start(source, ConfigFile::in_dir(save.path()), code("en")).await;

    assert_eq!(store.translate("greeting"), "Hello");
    assert_eq!(
        store.list_available_languages().await,
        vec![code("en"), code("ptBR")]
    );

    store.load(&code("ptBR")).await.unwrap();
    assert_eq!(store.translate("greeting"), "Olá");

    // 404 from the server is a missing locale, not a transport error
    let err = store.load(&code("fr")).await.unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
    assert_eq!(store.current_language(), code("ptBR"));
}

#[tokio::test]
async fn test_http_server_error_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/en.json"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let save = TempDir::new().unwrap();
    let source = HttpLocaleSource::new(server.uri()).with_retry(RetryConfig::no_retry());
    let store = TranslationStore::new(source, ConfigFile::in_dir(save.path()), code("en"));

    let err = store.load(&code("en")).await.unwrap_err();
    assert!(matches!(err, LoadError::Transport { .. }));
    assert!(store.translations().is_empty());
}

// ==================== Property Tests ====================

#[test]
fn test_absent_keys_always_fall_back() {
    let dir = create_game_dir();
    let store = tokio_test::block_on(start_session(dir.path()));
    assert_eq!(store.translate("greeting"), "Hello");

    proptest!(|(key in "\\PC{0,32}")| {
        prop_assume!(key != "greeting" && key != "language");
        prop_assert_eq!(store.translate(&key), key);
    });
}
