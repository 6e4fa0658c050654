/*!
 * Per-request engine invocation.
 *
 * Builds the engine-side argument values for one translation request and
 * invokes the single-model or pivoting translate capability according to the
 * route. All transient request and response values are owned, so they are
 * released on every exit path, including failures.
 */

use log::warn;

use crate::engine::{Engine, EngineResponse, ResponseOptions};
use crate::errors::TranslationError;
use crate::session::cache::ModelCache;
use crate::session::router::Route;

/// Caller-facing per-text options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    /// Whether the text is HTML and tags must be preserved
    pub html: bool,

    /// Whether quality scores should be attached to the output
    pub quality_scores: bool,
}

/// Execute one translation request against the engine.
///
/// Texts that are blank after trimming are dropped together with their
/// option entry. The engine call itself is blocking and CPU-bound.
pub fn execute(
    engine: &dyn Engine,
    cache: &ModelCache,
    route: &Route,
    texts: &[String],
    options: &[TranslateOptions],
) -> Result<Vec<EngineResponse>, TranslationError> {
    if options.is_empty() {
        return Err(TranslationError::NoOptions);
    }
    if texts.len() != options.len() {
        warn!(
            "Options count ({}) does not match text count ({}); extra entries are ignored",
            options.len(),
            texts.len()
        );
    }

    // One response-options entry per kept text, paired positionally.
    // Alignment is always requested.
    let (source_texts, response_options): (Vec<String>, Vec<ResponseOptions>) = texts
        .iter()
        .zip(options)
        .filter_map(|(text, opts)| {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            Some((
                trimmed.to_string(),
                ResponseOptions {
                    quality_scores: opts.quality_scores,
                    alignment: true,
                    html: opts.html,
                },
            ))
        })
        .unzip();

    if source_texts.is_empty() {
        return Err(TranslationError::EmptyInput);
    }

    match route {
        Route::Direct { pair } => {
            let model = cache
                .get(&pair.key())
                .ok_or_else(|| TranslationError::ModelNotLoaded(pair.key()))?;
            engine
                .translate(model, &source_texts, &response_options)
                .map_err(TranslationError::from)
        }
        Route::Pivot {
            source_to_pivot,
            pivot_to_target,
        } => {
            let first = cache
                .get(&source_to_pivot.key())
                .ok_or_else(|| TranslationError::ModelNotLoaded(source_to_pivot.key()))?;
            let second = cache
                .get(&pivot_to_target.key())
                .ok_or_else(|| TranslationError::ModelNotLoaded(pivot_to_target.key()))?;
            engine
                .translate_via_pivoting(first, second, &source_texts, &response_options)
                .map_err(TranslationError::from)
        }
    }
}
