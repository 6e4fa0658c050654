/*!
 * Session boundary for the translation orchestrator.
 *
 * This module handles:
 * - Importing and initializing the engine runtime, once per session
 * - Loading translation models from a registry into the model cache
 * - Executing translation requests and projecting their results
 *
 * One `TranslationSession` is constructed per worker. Operations are meant
 * to run one at a time; a `load_model` racing a `translate` on the same
 * session can clear the cache underneath the translate, which is an accepted
 * property of the design rather than a handled invariant.
 */

use log::{debug, error, info};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::SessionConfig;
use crate::assets::{AssetDescriptor, AssetKind, AssetLoader};
use crate::engine::{Engine, ModelBuffers};
use crate::errors::SessionError;
use crate::language_utils::LanguagePair;
use crate::registry::ModelRegistry;
use crate::session::cache::ModelCache;
use crate::session::executor::{self, TranslateOptions};
use crate::session::projector::{self, TranslationResult};
use crate::session::router::{PivotRouter, Route};

/// Status string reported when a model load succeeds
pub const MODEL_LOAD_SUCCEEDED: &str = "Model successfully loaded";

/// Status string reported when a model load fails
pub const MODEL_LOAD_FAILED: &str = "Model loading failed";

/// Orchestrates the lifecycle of translation models and the execution of
/// translation requests against them
pub struct TranslationSession {
    /// Session configuration
    config: SessionConfig,

    /// The imported engine; set at most once per session
    engine: OnceCell<Arc<dyn Engine>>,

    /// Loaded models, keyed by language-pair key
    cache: ModelCache,

    /// Direct/pivot routing policy
    router: PivotRouter,

    /// Asset fetching
    loader: AssetLoader,
}

impl TranslationSession {
    /// Create a session from its configuration
    pub fn new(config: SessionConfig) -> Self {
        let router = PivotRouter::new(&config.pivot_language, config.enable_pivoting);
        Self {
            engine: OnceCell::new(),
            cache: ModelCache::new(),
            router,
            loader: AssetLoader::new(),
            config,
        }
    }

    /// Import the engine runtime and await its readiness.
    ///
    /// Succeeds at most once per session; further calls fail with
    /// `EngineAlreadyImported`.
    pub async fn import_engine(&self, engine: Arc<dyn Engine>) -> Result<(), SessionError> {
        if self.engine.get().is_some() {
            return Err(SessionError::EngineAlreadyImported);
        }

        let started = Instant::now();
        engine.initialize(&self.config.engine).await?;
        self.engine
            .set(engine)
            .map_err(|_| SessionError::EngineAlreadyImported)?;
        info!("Engine runtime initialized in {:.2?}", started.elapsed());
        Ok(())
    }

    /// Load the model(s) needed to translate `from` -> `to`.
    ///
    /// Returns a human-readable status string instead of an error so that
    /// caller UIs can display it directly; the failure cause is logged.
    pub async fn load_model(&self, from: &str, to: &str, registry: &ModelRegistry) -> String {
        let started = Instant::now();
        match self.try_load_model(from, to, registry).await {
            Ok(()) => {
                info!(
                    "Model '{from}{to}' successfully constructed in {:.2?}",
                    started.elapsed()
                );
                MODEL_LOAD_SUCCEEDED.to_string()
            }
            Err(error) => {
                error!("Model '{from}{to}' construction failed: {error}");
                MODEL_LOAD_FAILED.to_string()
            }
        }
    }

    async fn try_load_model(
        &self,
        from: &str,
        to: &str,
        registry: &ModelRegistry,
    ) -> Result<(), SessionError> {
        if from == to {
            debug!("Identity pair '{from}{to}', nothing to construct");
            return Ok(());
        }

        let engine = self.engine()?;

        // Every load starts from an empty cache; loading is never incremental.
        let released = self.cache.clear_all(engine.as_ref());
        if released > 0 {
            debug!("Released {released} previously loaded model(s)");
        }

        match self.router.route(from, to) {
            Route::Direct { pair } => {
                self.construct_model(engine.as_ref(), &pair, registry).await
            }
            Route::Pivot {
                source_to_pivot,
                pivot_to_target,
            } => {
                futures::future::try_join(
                    self.construct_model(engine.as_ref(), &source_to_pivot, registry),
                    self.construct_model(engine.as_ref(), &pivot_to_target, registry),
                )
                .await
                .map(|_| ())
            }
        }
    }

    /// Download one pair's assets, hand them to the engine, and cache the
    /// resulting handle
    async fn construct_model(
        &self,
        engine: &dyn Engine,
        pair: &LanguagePair,
        registry: &ModelRegistry,
    ) -> Result<(), SessionError> {
        debug!("Constructing translation model {pair}");

        let assets = registry
            .get(pair)
            .ok_or_else(|| SessionError::PairNotInRegistry(pair.key()))?;
        let verify = self.config.verify_checksums;

        let weights_descriptor = AssetDescriptor::from_entry(AssetKind::Weights, &assets.model, verify);
        let shortlist_descriptor =
            AssetDescriptor::from_entry(AssetKind::LexicalShortlist, &assets.lex, verify);
        let vocabulary_descriptor =
            AssetDescriptor::from_entry(AssetKind::Vocabulary, &assets.vocab, verify);
        let quality_descriptor = assets
            .quality_model
            .as_ref()
            .map(|entry| AssetDescriptor::from_entry(AssetKind::QualityModel, entry, verify));

        // All asset downloads for one model run concurrently and are joined
        // before construction proceeds.
        let (weights, shortlist, vocabulary, quality_model) = match quality_descriptor {
            Some(descriptor) => {
                let (weights, shortlist, vocabulary, quality) = futures::try_join!(
                    self.loader.load(&weights_descriptor),
                    self.loader.load(&shortlist_descriptor),
                    self.loader.load(&vocabulary_descriptor),
                    self.loader.load(&descriptor),
                )?;
                (weights, shortlist, vocabulary, Some(quality))
            }
            None => {
                let (weights, shortlist, vocabulary) = futures::try_join!(
                    self.loader.load(&weights_descriptor),
                    self.loader.load(&shortlist_descriptor),
                    self.loader.load(&vocabulary_descriptor),
                )?;
                (weights, shortlist, vocabulary, None)
            }
        };

        debug!(
            "Aligned memory sizes: Model:{} Shortlist:{} Vocab:{}",
            weights.len(),
            shortlist.len(),
            vocabulary.len()
        );

        let buffers = ModelBuffers {
            weights,
            shortlist,
            vocabularies: vec![vocabulary],
            quality_model,
        };
        let handle = engine.new_model(&self.config.model.to_config_string(), buffers)?;
        self.cache.insert(&pair.key(), handle);
        Ok(())
    }

    /// Translate `texts` from `from` to `to`.
    ///
    /// Returns `None` on internal failure; the cause is logged rather than
    /// propagated across the session boundary.
    pub async fn translate(
        &self,
        from: &str,
        to: &str,
        texts: &[String],
        options: &[TranslateOptions],
    ) -> Option<Vec<TranslationResult>> {
        let started = Instant::now();
        let word_count: usize = texts.iter().map(|text| words_count(text)).sum();
        debug!("Blocks to translate: {}", texts.len());

        match self.try_translate(from, to, texts, options) {
            Ok(results) => {
                let secs = started.elapsed().as_secs_f64();
                if secs > 0.0 {
                    debug!(
                        "Speed: {} WPS ({} words in {:.2} secs)",
                        (word_count as f64 / secs).round(),
                        word_count,
                        secs
                    );
                }
                Some(results)
            }
            Err(error) => {
                error!("Translation '{from}{to}' failed: {error}");
                None
            }
        }
    }

    fn try_translate(
        &self,
        from: &str,
        to: &str,
        texts: &[String],
        options: &[TranslateOptions],
    ) -> Result<Vec<TranslationResult>, SessionError> {
        let engine = self.engine()?;
        let route = self.router.route(from, to);
        let responses = executor::execute(engine.as_ref(), &self.cache, &route, texts, options)?;
        Ok(projector::project(&responses))
    }

    /// Number of models currently loaded
    pub fn loaded_model_count(&self) -> usize {
        self.cache.len()
    }

    /// Whether a pair currently has a loaded model
    pub fn is_pair_loaded(&self, from: &str, to: &str) -> bool {
        self.cache.contains(&LanguagePair::new(from, to).key())
    }

    /// The session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn engine(&self) -> Result<&Arc<dyn Engine>, SessionError> {
        self.engine.get().ok_or(SessionError::EngineNotImported)
    }
}

/// Whitespace-separated word count, used for throughput logging
fn words_count(text: &str) -> usize {
    text.split_whitespace().count()
}
