/*!
 * # bergamot-session
 *
 * A Rust library orchestrating the lifecycle of Bergamot-style machine
 * translation models inside a worker and executing translation requests
 * against them.
 *
 * ## Features
 *
 * - Load model assets from URLs or local paths into alignment-constrained
 *   memory buffers
 * - Cache constructed translation models per language pair
 * - Route requests directly or through an intermediate pivot language
 * - Project engine responses into per-sentence substrings using UTF-8 byte
 *   offsets
 * - Pluggable inference engine behind a capability trait, with an in-memory
 *   mock for testing
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Session and decoder configuration
 * - `assets`: Asset fetching and aligned buffer preparation
 * - `registry`: Read-only model registry lookup
 * - `engine`: The engine capability trait and its data types
 * - `session`: The orchestrator core:
 *   - `session::cache`: Ownership of loaded model handles
 *   - `session::router`: Direct vs. pivoted routing
 *   - `session::executor`: Per-request engine invocation
 *   - `session::projector`: Byte-range result projection
 *   - `session::manager`: The session boundary
 * - `language_utils`: Language-pair keys and ISO code utilities
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod assets;
pub mod engine;
pub mod errors;
pub mod language_utils;
pub mod registry;
pub mod session;

// Re-export main types for easier usage
pub use app_config::SessionConfig;
pub use engine::{AlignedBuffer, ByteRange, Engine, EngineResponse, ModelHandle};
pub use errors::{AssetError, EngineError, SessionError, TranslationError};
pub use language_utils::LanguagePair;
pub use registry::ModelRegistry;
pub use session::{TranslateOptions, TranslationResult, TranslationSession};
