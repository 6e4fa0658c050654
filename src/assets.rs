/*!
 * Asset loading for translation models.
 *
 * Fetches raw bytes for a named model asset, either over HTTP or from the
 * local filesystem depending on the location string, and copies them into a
 * buffer aligned to the asset kind's requirement. Nothing is cached across
 * calls; every load re-fetches.
 */

use bytes::Bytes;
use log::debug;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use url::Url;

use crate::engine::AlignedBuffer;
use crate::errors::AssetError;
use crate::registry::AssetEntry;

/// The kinds of assets a translation model is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Model weights
    Weights,
    /// Lexical shortlist
    LexicalShortlist,
    /// Vocabulary, shared across both directions of a pair
    Vocabulary,
    /// Optional quality estimation model
    QualityModel,
}

impl AssetKind {
    /// Byte alignment the engine requires for this kind of asset
    pub fn alignment(&self) -> usize {
        match self {
            Self::Weights => 256,
            Self::LexicalShortlist | Self::Vocabulary | Self::QualityModel => 64,
        }
    }

    /// Key under which this kind appears in a registry pair entry
    pub fn registry_key(&self) -> &'static str {
        match self {
            Self::Weights => "model",
            Self::LexicalShortlist => "lex",
            Self::Vocabulary => "vocab",
            Self::QualityModel => "qualityModel",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.registry_key())
    }
}

/// Everything needed to fetch and place one asset
#[derive(Debug, Clone)]
pub struct AssetDescriptor {
    /// What the asset is
    pub kind: AssetKind,

    /// Required byte alignment of the prepared buffer
    pub alignment: usize,

    /// URL or local path to fetch the bytes from
    pub location: String,

    /// SHA-256 hex digest to verify against, when verification is enabled
    pub expected_sha256: Option<String>,
}

impl AssetDescriptor {
    /// Descriptor for a location with the kind's default alignment and no
    /// checksum verification
    pub fn new(kind: AssetKind, location: &str) -> Self {
        Self {
            kind,
            alignment: kind.alignment(),
            location: location.to_string(),
            expected_sha256: None,
        }
    }

    /// Descriptor built from a registry entry
    pub fn from_entry(kind: AssetKind, entry: &AssetEntry, verify_checksum: bool) -> Self {
        let expected_sha256 = if verify_checksum && !entry.expected_sha256_hash.is_empty() {
            Some(entry.expected_sha256_hash.clone())
        } else {
            None
        };
        Self {
            kind,
            alignment: kind.alignment(),
            location: entry.name.clone(),
            expected_sha256,
        }
    }
}

/// Fetches asset bytes and prepares aligned buffers from them
#[derive(Debug, Clone)]
pub struct AssetLoader {
    /// HTTP client, reused across downloads
    client: reqwest::Client,
}

impl AssetLoader {
    /// Create a new loader with a fresh HTTP client
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the descriptor's bytes and copy them into an aligned buffer
    pub async fn load(&self, descriptor: &AssetDescriptor) -> Result<AlignedBuffer, AssetError> {
        let bytes = self.fetch(&descriptor.location).await?;

        if let Some(expected) = &descriptor.expected_sha256 {
            verify_checksum(&descriptor.location, &bytes, expected)?;
        }

        let buffer = AlignedBuffer::from_bytes(&bytes, descriptor.alignment)?;
        debug!(
            "{} aligned memory prepared. Size: {} bytes, alignment: {}",
            descriptor.kind,
            buffer.len(),
            buffer.alignment()
        );
        Ok(buffer)
    }

    /// Fetch raw bytes from a URL or a local path, selected at runtime from
    /// the location string
    async fn fetch(&self, location: &str) -> Result<Bytes, AssetError> {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => self.fetch_http(&url).await,
            Ok(url) if url.scheme() == "file" => {
                let path = url.to_file_path().map_err(|_| {
                    AssetError::Unavailable(format!("{location}: not a local file path"))
                })?;
                read_file(path).await
            }
            // Anything else is treated as a plain filesystem path
            _ => read_file(PathBuf::from(location)).await,
        }
    }

    async fn fetch_http(&self, url: &Url) -> Result<Bytes, AssetError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AssetError::Unavailable(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| AssetError::Unavailable(format!("{url}: {e}")))
    }
}

impl Default for AssetLoader {
    fn default() -> Self {
        Self::new()
    }
}

async fn read_file(path: PathBuf) -> Result<Bytes, AssetError> {
    fs::read(&path)
        .await
        .map(Bytes::from)
        .map_err(|e| AssetError::Unavailable(format!("{}: {e}", path.display())))
}

fn verify_checksum(location: &str, bytes: &[u8], expected: &str) -> Result<(), AssetError> {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let actual = format!("{:x}", hasher.finalize());

    if !actual.eq_ignore_ascii_case(expected) {
        return Err(AssetError::ChecksumMismatch {
            location: location.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
