//! Language code type: a validated locale identifier.
//!
//! A `LanguageCode` names a locale resource (`en` → `en.json`), so it is
//! restricted to characters that are safe as a file stem or URL segment.

use crate::error::LanguageCodeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static CODE_REGEX: OnceLock<Regex> = OnceLock::new();

/// A validated language code (e.g. "en", "ptBR", "zh_CN").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Create a language code from a string.
    ///
    /// # Arguments
    /// * `code` - Locale identifier, e.g. "en" or "ptBR"
    ///
    /// # Returns
    /// * `Ok(LanguageCode)` if the code is non-empty and uses only ASCII
    ///   letters, digits, `-` and `_`
    /// * `Err(LanguageCodeError)` otherwise
    pub fn new(code: impl Into<String>) -> Result<Self, LanguageCodeError> {
        let code = code.into();
        if code.is_empty() {
            return Err(LanguageCodeError::Empty);
        }

        let regex = CODE_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
        if !regex.is_match(&code) {
            return Err(LanguageCodeError::InvalidCharacters(code));
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this language's locale resource (`<code>.json`).
    pub fn resource_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LanguageCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = LanguageCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}
