/*!
 * Common test utilities for the bergamot-session test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use bergamot_session::registry::ModelRegistry;

/// Initializes logging for the test run; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test asset file with the given content in the specified directory
pub fn create_asset_file(dir: &Path, filename: &str, content: &[u8]) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// SHA-256 hex digest of a byte slice
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Registry entry JSON for one on-disk asset
fn asset_entry(path: &Path, content: &[u8]) -> serde_json::Value {
    json!({
        "name": path.to_string_lossy(),
        "expectedSha256Hash": sha256_hex(content),
        "estimatedCompressedSize": content.len(),
        "modelType": "prod",
        "size": content.len(),
    })
}

/// Builds a registry whose pairs point at freshly written local asset files.
///
/// Each pair gets distinct weights, shortlist, and vocabulary files; no
/// quality model entries are written.
pub fn local_registry(dir: &Path, pairs: &[&str]) -> Result<ModelRegistry> {
    let mut registry = serde_json::Map::new();
    for pair in pairs {
        let weights_content = format!("{pair}-weights").into_bytes();
        let lex_content = format!("{pair}-lex").into_bytes();
        let vocab_content = format!("{pair}-vocab").into_bytes();

        let weights = create_asset_file(dir, &format!("{pair}.model.bin"), &weights_content)?;
        let lex = create_asset_file(dir, &format!("{pair}.lex.bin"), &lex_content)?;
        let vocab = create_asset_file(dir, &format!("{pair}.vocab.bin"), &vocab_content)?;

        registry.insert(
            pair.to_string(),
            json!({
                "model": asset_entry(&weights, &weights_content),
                "lex": asset_entry(&lex, &lex_content),
                "vocab": asset_entry(&vocab, &vocab_content),
            }),
        );
    }
    Ok(ModelRegistry::from_json(&serde_json::Value::Object(registry).to_string())?)
}

/// Registry JSON for a single pair, as a raw string
pub fn registry_json_for_pair(dir: &Path, pair: &str) -> Result<String> {
    let weights_content = b"weights bytes".to_vec();
    let lex_content = b"lex bytes".to_vec();
    let vocab_content = b"vocab bytes".to_vec();

    let weights = create_asset_file(dir, &format!("{pair}.model.bin"), &weights_content)?;
    let lex = create_asset_file(dir, &format!("{pair}.lex.bin"), &lex_content)?;
    let vocab = create_asset_file(dir, &format!("{pair}.vocab.bin"), &vocab_content)?;

    Ok(json!({
        pair: {
            "model": asset_entry(&weights, &weights_content),
            "lex": asset_entry(&lex, &lex_content),
            "vocab": asset_entry(&vocab, &vocab_content),
        }
    })
    .to_string())
}
