/*!
 * Cache of loaded translation models.
 *
 * The cache is the exclusive owner of every `ModelHandle` the session holds.
 * Model loading is never incremental: every load clears the whole cache
 * first, so switching any language direction discards every other loaded
 * direction as well. Callers that need multi-pair concurrency must run one
 * session per pair.
 */

use log::debug;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::engine::{Engine, ModelHandle};

/// Owns zero or more constructed translation-model handles keyed by
/// language-pair key
#[derive(Debug, Default)]
pub struct ModelCache {
    /// Internal handle storage
    models: RwLock<HashMap<String, ModelHandle>>,
}

impl ModelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Get the handle loaded for a pair key, if any
    pub fn get(&self, pair_key: &str) -> Option<ModelHandle> {
        self.models.read().get(pair_key).copied()
    }

    /// Insert a handle for a pair key.
    ///
    /// Overwrites any existing entry without releasing it; callers must have
    /// cleared the cache beforehand.
    pub fn insert(&self, pair_key: &str, handle: ModelHandle) {
        self.models.write().insert(pair_key.to_string(), handle);
    }

    /// Release every held handle through the engine and empty the cache,
    /// returning the number of handles released
    pub fn clear_all(&self, engine: &dyn Engine) -> usize {
        let mut models = self.models.write();
        let released = models.len();
        for (pair_key, handle) in models.drain() {
            debug!("Destructing model '{pair_key}'");
            engine.release_model(handle);
        }
        released
    }

    /// Whether a pair key has a loaded handle
    pub fn contains(&self, pair_key: &str) -> bool {
        self.models.read().contains_key(pair_key)
    }

    /// Number of loaded handles
    pub fn len(&self) -> usize {
        self.models.read().len()
    }

    /// Whether the cache holds no handles
    pub fn is_empty(&self) -> bool {
        self.models.read().is_empty()
    }
}
