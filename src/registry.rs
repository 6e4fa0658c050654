/*!
 * Model registry lookup.
 *
 * The registry is a read-only mapping from language-pair key to the asset
 * entries required to build that pair's model, supplied by the caller in the
 * registry.json wire format. Only the asset names and kinds feed the loader;
 * the checksum fields are used when checksum verification is enabled.
 */

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

use crate::assets::{AssetDescriptor, AssetKind};
use crate::language_utils::{LanguagePair, split_pair_key};

/// One asset entry as it appears in registry.json
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AssetEntry {
    /// Asset location: URL or local path
    pub name: String,

    /// SHA-256 hex digest of the asset content
    #[serde(default)]
    pub expected_sha256_hash: String,

    /// Download size estimate in bytes
    #[serde(default)]
    pub estimated_compressed_size: u64,

    /// Model flavor tag, e.g. "prod" or "dev"
    #[serde(default)]
    pub model_type: String,

    /// Uncompressed size in bytes
    #[serde(default)]
    pub size: u64,
}

/// The set of assets registered for one language pair.
///
/// The vocabulary is shared across both translation directions of a pair;
/// the quality estimation model is optional.
#[derive(Debug, Deserialize, Clone)]
pub struct PairAssets {
    /// Model weights
    pub model: AssetEntry,

    /// Lexical shortlist
    pub lex: AssetEntry,

    /// Shared vocabulary
    pub vocab: AssetEntry,

    /// Optional quality estimation model
    #[serde(rename = "qualityModel", default)]
    pub quality_model: Option<AssetEntry>,
}

impl PairAssets {
    /// Descriptors for every asset needed to construct this pair's model,
    /// in construction order: weights, shortlist, vocabulary, then the
    /// quality model when present
    pub fn descriptors(&self, verify_checksums: bool) -> Vec<AssetDescriptor> {
        let mut descriptors = vec![
            AssetDescriptor::from_entry(AssetKind::Weights, &self.model, verify_checksums),
            AssetDescriptor::from_entry(AssetKind::LexicalShortlist, &self.lex, verify_checksums),
            AssetDescriptor::from_entry(AssetKind::Vocabulary, &self.vocab, verify_checksums),
        ];
        if let Some(quality) = &self.quality_model {
            descriptors.push(AssetDescriptor::from_entry(
                AssetKind::QualityModel,
                quality,
                verify_checksums,
            ));
        }
        descriptors
    }
}

/// Read-only mapping from language-pair key to registered assets
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct ModelRegistry {
    pairs: HashMap<String, PairAssets>,
}

impl ModelRegistry {
    /// Parse a registry from its JSON wire format
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse model registry JSON")
    }

    /// Look up the assets registered for a language pair
    pub fn get(&self, pair: &LanguagePair) -> Option<&PairAssets> {
        self.pairs.get(&pair.key())
    }

    /// Whether a language pair is registered
    pub fn contains(&self, pair: &LanguagePair) -> bool {
        self.pairs.contains_key(&pair.key())
    }

    /// All registered pair keys, sorted
    pub fn pair_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.pairs.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// The distinct languages appearing on either side of any registered
    /// pair, sorted
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .pairs
            .keys()
            .filter_map(|key| split_pair_key(key))
            .flat_map(|(source, target)| [source, target])
            .collect();
        languages.sort_unstable();
        languages.dedup();
        languages
    }

    /// Number of registered pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
