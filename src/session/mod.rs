/*!
 * The translation session and its components.
 *
 * This module contains the orchestrator core. It is split into several
 * submodules:
 *
 * - `cache`: Ownership of loaded model handles
 * - `router`: Direct vs. pivoted routing decisions
 * - `executor`: Per-request engine invocation
 * - `projector`: Byte-range projection of engine responses
 * - `manager`: The session boundary tying the components together
 */

// Re-export main types for easier usage
pub use self::cache::ModelCache;
pub use self::executor::TranslateOptions;
pub use self::manager::{MODEL_LOAD_FAILED, MODEL_LOAD_SUCCEEDED, TranslationSession};
pub use self::projector::TranslationResult;
pub use self::router::{PivotRouter, Route};

// Submodules
pub mod cache;
pub mod executor;
pub mod manager;
pub mod projector;
pub mod router;
