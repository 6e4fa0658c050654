/*!
 * Mock engine implementation for testing.
 *
 * This module provides an in-memory engine double that simulates different
 * behaviors:
 * - `MockEngine::working()` - Always succeeds with a pseudo-translation
 * - `MockEngine::failing_construction()` - Rejects every model construction
 * - `MockEngine::failing_translation()` - Fails every translate call
 * - `MockEngine::failing_initialization()` - Never becomes ready
 *
 * The mock tracks construction, release, and invocation counts so tests can
 * assert on resource lifecycles.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use super::{ByteRange, Engine, EngineResponse, ModelBuffers, ModelHandle, ResponseOptions};
use crate::app_config::EngineServiceConfig;
use crate::errors::EngineError;

/// Behavior mode for the mock engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with an uppercased pseudo-translation
    Working,
    /// Rejects every model construction
    FailingConstruction,
    /// Fails every translate call
    FailingTranslation,
    /// Initialization never succeeds
    FailingInitialization,
}

/// Mock engine for testing session behavior
#[derive(Debug)]
pub struct MockEngine {
    /// Behavior mode
    behavior: MockBehavior,
    /// Next model id to hand out
    next_id: AtomicU64,
    /// Handles that are currently alive
    live_models: Mutex<HashSet<u64>>,
    /// Number of models constructed so far
    constructed: AtomicUsize,
    /// Number of models released so far
    released: AtomicUsize,
    /// Number of single-model translate calls
    translate_calls: AtomicUsize,
    /// Number of pivoting translate calls
    pivot_calls: AtomicUsize,
    /// Number of initialize calls
    initialize_calls: AtomicUsize,
    /// Service settings seen by the most recent initialize call
    service_config: Mutex<Option<EngineServiceConfig>>,
    /// Texts submitted by the most recent translate call
    last_texts: Mutex<Vec<String>>,
    /// Options submitted by the most recent translate call
    last_options: Mutex<Vec<ResponseOptions>>,
}

impl MockEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            next_id: AtomicU64::new(1),
            live_models: Mutex::new(HashSet::new()),
            constructed: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
            translate_calls: AtomicUsize::new(0),
            pivot_calls: AtomicUsize::new(0),
            initialize_calls: AtomicUsize::new(0),
            service_config: Mutex::new(None),
            last_texts: Mutex::new(Vec::new()),
            last_options: Mutex::new(Vec::new()),
        }
    }

    /// Create a working mock engine that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock engine that rejects every model construction
    pub fn failing_construction() -> Self {
        Self::new(MockBehavior::FailingConstruction)
    }

    /// Create a mock engine that fails every translate call
    pub fn failing_translation() -> Self {
        Self::new(MockBehavior::FailingTranslation)
    }

    /// Create a mock engine whose runtime never becomes ready
    pub fn failing_initialization() -> Self {
        Self::new(MockBehavior::FailingInitialization)
    }

    /// Number of models constructed so far
    pub fn constructed_count(&self) -> usize {
        self.constructed.load(Ordering::SeqCst)
    }

    /// Number of models released so far
    pub fn released_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    /// Number of handles currently alive
    pub fn live_model_count(&self) -> usize {
        self.live_models.lock().len()
    }

    /// Number of single-model translate calls
    pub fn translate_call_count(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    /// Number of pivoting translate calls
    pub fn pivot_call_count(&self) -> usize {
        self.pivot_calls.load(Ordering::SeqCst)
    }

    /// Number of initialize calls
    pub fn initialize_call_count(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    /// Translation-cache size the runtime was brought up with, if any
    pub fn initialized_cache_size(&self) -> Option<usize> {
        self.service_config.lock().as_ref().map(|config| config.cache_size)
    }

    /// Texts submitted by the most recent translate call
    pub fn last_texts(&self) -> Vec<String> {
        self.last_texts.lock().clone()
    }

    /// Options submitted by the most recent translate call
    pub fn last_options(&self) -> Vec<ResponseOptions> {
        self.last_options.lock().clone()
    }

    fn check_live(&self, handle: ModelHandle) -> Result<(), EngineError> {
        if self.live_models.lock().contains(&handle.id()) {
            Ok(())
        } else {
            Err(EngineError::TranslationFailed(format!(
                "model handle {} is not alive",
                handle.id()
            )))
        }
    }

    fn record(&self, texts: &[String], options: &[ResponseOptions]) {
        *self.last_texts.lock() = texts.to_vec();
        *self.last_options.lock() = options.to_vec();
    }

    fn respond(&self, texts: &[String]) -> Vec<EngineResponse> {
        texts
            .iter()
            .map(|text| {
                let translated = pseudo_translate(text);
                EngineResponse::new(
                    text.clone(),
                    translated.clone(),
                    sentence_ranges(text),
                    sentence_ranges(&translated),
                )
            })
            .collect()
    }
}

#[async_trait]
impl Engine for MockEngine {
    async fn initialize(&self, config: &EngineServiceConfig) -> Result<(), EngineError> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        if self.behavior == MockBehavior::FailingInitialization {
            return Err(EngineError::InitializationFailed(
                "mock runtime unavailable".to_string(),
            ));
        }
        *self.service_config.lock() = Some(config.clone());
        Ok(())
    }

    fn new_model(&self, _config: &str, buffers: ModelBuffers) -> Result<ModelHandle, EngineError> {
        if self.behavior == MockBehavior::FailingConstruction {
            return Err(EngineError::ConstructionFailed(
                "mock engine rejects all models".to_string(),
            ));
        }
        if buffers.vocabularies.is_empty() {
            return Err(EngineError::ConstructionFailed(
                "no vocabulary buffers supplied".to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.live_models.lock().insert(id);
        self.constructed.fetch_add(1, Ordering::SeqCst);
        Ok(ModelHandle::new(id))
    }

    fn release_model(&self, handle: ModelHandle) {
        if self.live_models.lock().remove(&handle.id()) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn translate(
        &self,
        model: ModelHandle,
        texts: &[String],
        options: &[ResponseOptions],
    ) -> Result<Vec<EngineResponse>, EngineError> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        self.record(texts, options);
        if self.behavior == MockBehavior::FailingTranslation {
            return Err(EngineError::TranslationFailed(
                "mock engine fails all translations".to_string(),
            ));
        }
        self.check_live(model)?;
        Ok(self.respond(texts))
    }

    fn translate_via_pivoting(
        &self,
        source_to_pivot: ModelHandle,
        pivot_to_target: ModelHandle,
        texts: &[String],
        options: &[ResponseOptions],
    ) -> Result<Vec<EngineResponse>, EngineError> {
        self.pivot_calls.fetch_add(1, Ordering::SeqCst);
        self.record(texts, options);
        if self.behavior == MockBehavior::FailingTranslation {
            return Err(EngineError::TranslationFailed(
                "mock engine fails all translations".to_string(),
            ));
        }
        self.check_live(source_to_pivot)?;
        self.check_live(pivot_to_target)?;
        Ok(self.respond(texts))
    }
}

/// Deterministic stand-in for a translation: uppercases the text, which
/// keeps multi-byte characters intact
fn pseudo_translate(text: &str) -> String {
    text.to_uppercase()
}

/// Segment a text into sentence byte ranges that tile it exactly.
///
/// Splits after `.`, `!` or `?` plus any following spaces, so concatenating
/// the ranges reproduces the original byte sequence. The byte-level scan is
/// safe because the split characters are ASCII.
pub fn sentence_ranges(text: &str) -> Vec<ByteRange> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') {
            let mut end = i + 1;
            while end < bytes.len() && bytes[end] == b' ' {
                end += 1;
            }
            ranges.push(ByteRange::new(start, end));
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }

    if start < bytes.len() {
        ranges.push(ByteRange::new(start, bytes.len()));
    }
    ranges
}
