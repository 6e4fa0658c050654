/*!
 * Error types for the bergamot-session crate.
 *
 * This module contains custom error types for different parts of the
 * orchestrator, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur while fetching and preparing model assets
#[derive(Error, Debug)]
pub enum AssetError {
    /// The byte source could not be reached or read
    #[error("Asset unavailable: {0}")]
    Unavailable(String),

    /// The remote source answered with a non-success status
    #[error("Downloading {url} failed: HTTP {status}")]
    Http {
        /// HTTP status code
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// Downloaded bytes did not match the registry checksum
    #[error("Checksum mismatch for {location}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        /// Asset location as given in the registry
        location: String,
        /// Expected SHA-256 hex digest
        expected: String,
        /// Actual SHA-256 hex digest of the downloaded bytes
        actual: String,
    },

    /// The requested alignment is not a valid allocation alignment
    #[error("Invalid alignment {0}: must be a non-zero power of two")]
    InvalidAlignment(usize),
}

/// Errors reported by the inference engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// The engine rejected the model configuration or buffers
    #[error("Model construction failed: {0}")]
    ConstructionFailed(String),

    /// The engine failed while translating
    #[error("Translation failed: {0}")]
    TranslationFailed(String),

    /// The engine runtime did not come up
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),
}

/// Errors that can occur during a translate operation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No non-blank text remained after trimming
    #[error("No text provided to translate")]
    EmptyInput,

    /// The per-text options sequence was empty
    #[error("No translation options provided")]
    NoOptions,

    /// Translate was requested before a matching load succeeded
    #[error("Translation model '{0}' not loaded")]
    ModelNotLoaded(String),

    /// Error from the inference engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Errors surfaced by the session boundary
#[derive(Error, Debug)]
pub enum SessionError {
    /// An engine has already been imported into this session
    #[error("Engine already imported for this session")]
    EngineAlreadyImported,

    /// No engine has been imported yet
    #[error("No engine imported for this session")]
    EngineNotImported,

    /// The registry has no entry for the requested pair
    #[error("Language pair '{0}' not found in model registry")]
    PairNotInRegistry(String),

    /// Error while loading model assets
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Error from the inference engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Error during translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}
