//! Locale file validation.
//!
//! Two checks live here: the shape check that every load runs (a locale
//! must be a flat JSON object of strings), and a completeness comparison of
//! one locale against a reference locale that `check-locales` reports on.

use crate::i18n::TranslationMap;
use serde_json::{Map, Value};

/// Validation report containing errors and warnings about a locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that make the locale unusable
    pub errors: Vec<String>,

    /// Problems worth fixing that do not block loading
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }

    /// Fold another report into this one.
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for locale files.
pub struct LocaleValidator;

impl LocaleValidator {
    /// Check that a parsed locale document is a flat string-to-string object.
    ///
    /// Errors are reported for a non-object document and for every value that
    /// is not a string. Empty values and keys with surrounding whitespace are
    /// warnings.
    pub fn validate_shape(document: &Value) -> ValidationReport {
        let mut report = ValidationReport::new();

        let Some(entries) = document.as_object() else {
            report.errors.push(format!(
                "expected a JSON object at the top level, found {}",
                json_kind(document)
            ));
            return report;
        };

        report.merge(Self::validate_entries(entries));
        report
    }

    fn validate_entries(entries: &Map<String, Value>) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut sorted: Vec<(&String, &Value)> = entries.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        for (key, value) in sorted {
            match value {
                Value::String(text) => {
                    if text.is_empty() {
                        report.warnings.push(format!("key '{}' has an empty value", key));
                    }
                }
                other => report
                    .errors
                    .push(format!("key '{}' is {}, expected a string", key, json_kind(other))),
            }

            if key.trim() != key.as_str() {
                report
                    .warnings
                    .push(format!("key '{}' has leading or trailing whitespace", key));
            }
        }

        report
    }

    /// Compare a locale against a reference locale (usually the default language).
    ///
    /// # Arguments
    /// * `reference` - The locale every other locale should cover
    /// * `candidate` - The locale being checked
    ///
    /// # Returns
    /// A `ValidationReport` with a warning per key missing from `candidate`
    /// and per key `candidate` has that `reference` does not.
    pub fn compare(reference: &TranslationMap, candidate: &TranslationMap) -> ValidationReport {
        let mut report = ValidationReport::new();

        let mut missing: Vec<&str> = reference
            .keys()
            .filter(|key| !candidate.contains_key(key))
            .collect();
        missing.sort_unstable();

        let mut extra: Vec<&str> = candidate
            .keys()
            .filter(|key| !reference.contains_key(key))
            .collect();
        extra.sort_unstable();

        if !missing.is_empty() {
            report
                .warnings
                .push(format!("missing {} key(s): {}", missing.len(), missing.join(", ")));
        }
        if !extra.is_empty() {
            report
                .warnings
                .push(format!("{} key(s) not in reference: {}", extra.len(), extra.join(", ")));
        }

        report
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
