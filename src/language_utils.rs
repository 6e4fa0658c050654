/*!
 * Language utilities for ISO language code handling.
 *
 * This module provides the language-pair key type used throughout the
 * orchestrator, plus helpers for validating ISO 639-1 codes and resolving
 * display names for CLI listings.
 */

use anyhow::{Result, anyhow};
use isolang::Language;
use std::fmt;

/// An ordered (source, target) language combination.
///
/// The cache key is the plain concatenation of the two codes. Both the model
/// loader and the registry lookup derive keys through this type, so the two
/// sides can never disagree on the derivation rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguagePair {
    source: String,
    target: String,
}

impl LanguagePair {
    /// Create a pair from source and target language codes
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// Source language code
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Target language code
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Registry/cache key for this pair, e.g. "enes"
    pub fn key(&self) -> String {
        format!("{}{}", self.source, self.target)
    }

    /// Whether source and target are the same language
    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.source, self.target)
    }
}

/// Split a registry pair key back into its two-letter source and target codes
///
/// Registry keys are formed by concatenating two ISO 639-1 codes, so anything
/// that is not exactly four ASCII characters is rejected. The ASCII check
/// keeps the split from landing inside a multi-byte character on arbitrary
/// caller-supplied keys.
pub fn split_pair_key(key: &str) -> Option<(String, String)> {
    if key.len() != 4 || !key.is_ascii() {
        return None;
    }
    let (source, target) = key.split_at(2);
    Some((source.to_string(), target.to_string()))
}

/// Validate that a language code is a known ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = code.trim().to_lowercase();

    if normalized.len() == 2 && Language::from_639_1(&normalized).is_some() {
        return Ok(());
    }
    if normalized.len() == 3 && Language::from_639_3(&normalized).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Get the English display name for a language code
///
/// Falls back to the code itself for codes isolang does not know, so that
/// registry listings stay usable with exotic entries.
pub fn get_language_name(code: &str) -> String {
    let normalized = code.trim().to_lowercase();

    let language = if normalized.len() == 2 {
        Language::from_639_1(&normalized)
    } else {
        Language::from_639_3(&normalized)
    };

    match language {
        Some(lang) => lang.to_name().to_string(),
        None => code.to_string(),
    }
}
