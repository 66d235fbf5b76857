//! The key→text map for one language and its parser.

use crate::error::LoadError;
use crate::i18n::{LanguageCode, LocaleValidator};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Translations for a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap {
    entries: HashMap<String, String>,
}

impl TranslationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a locale body fetched for `language`.
    ///
    /// The body must be a JSON object whose values are all strings. Anything
    /// else is rejected as a whole; there is no partial map. Shape warnings
    /// (empty values and similar) are logged and do not fail the parse.
    pub fn parse(language: &LanguageCode, body: &str) -> Result<Self, LoadError> {
        let document: Value =
            serde_json::from_str(body).map_err(|source| LoadError::Malformed {
                language: language.clone(),
                source,
            })?;

        let report = LocaleValidator::validate_shape(&document);
        if report.has_errors() {
            return Err(LoadError::InvalidShape {
                language: language.clone(),
                problems: report.errors,
            });
        }
        if report.has_warnings() {
            warn!("Locale '{}' warnings: {:?}", language, report.warnings);
        }

        let entries = match document {
            Value::Object(object) => object
                .into_iter()
                .filter_map(|(key, value)| match value {
                    Value::String(text) => Some((key, text)),
                    _ => None,
                })
                .collect(),
            _ => HashMap::new(),
        };

        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> LanguageCode {
        LanguageCode::new("en").unwrap()
    }

    #[test]
    fn test_parse_flat_object() {
        let map = TranslationMap::parse(&en(), r#"{"greeting":"Hello","farewell":"Bye"}"#)
            .expect("Should parse");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("greeting"), Some("Hello"));
        assert_eq!(map.get("farewell"), Some("Bye"));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_parse_empty_object() {
        let map = TranslationMap::parse(&en(), "{}").expect("Should parse");
        assert!(map.is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = TranslationMap::parse(&en(), r#"{"greeting": "Hello""#).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
        assert_eq!(err.language(), &en());
    }

    #[test]
    fn test_parse_rejects_nested_values() {
        let err = TranslationMap::parse(&en(), r#"{"greeting":"Hello","menu":{"file":"File"}}"#)
            .unwrap_err();
        match err {
            LoadError::InvalidShape { problems, .. } => {
                assert_eq!(problems.len(), 1);
                assert!(problems[0].contains("'menu'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = TranslationMap::parse(&en(), r#""just a string""#).unwrap_err();
        assert!(matches!(err, LoadError::InvalidShape { .. }));
    }

    #[test]
    fn test_from_iterator() {
        let map: TranslationMap = vec![("a".to_string(), "A".to_string())]
            .into_iter()
            .collect();
        assert!(map.contains_key("a"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a"]);
    }
}
