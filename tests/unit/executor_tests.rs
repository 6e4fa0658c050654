/*!
 * Tests for per-request engine invocation
 */

use bergamot_session::engine::mock::MockEngine;
use bergamot_session::engine::{AlignedBuffer, Engine, ModelBuffers};
use bergamot_session::errors::TranslationError;
use bergamot_session::session::executor::{self, TranslateOptions};
use bergamot_session::session::{ModelCache, PivotRouter};

fn load_pair(engine: &MockEngine, cache: &ModelCache, pair_key: &str) {
    let buffers = ModelBuffers {
        weights: AlignedBuffer::from_bytes(b"weights", 256).unwrap(),
        shortlist: AlignedBuffer::from_bytes(b"lex", 64).unwrap(),
        vocabularies: vec![AlignedBuffer::from_bytes(b"vocab", 64).unwrap()],
        quality_model: None,
    };
    let handle = engine.new_model("config", buffers).unwrap();
    cache.insert(pair_key, handle);
}

fn texts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_executor_execute_withEmptyOptions_shouldFailWithoutEngineCall() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "enes");
    let route = PivotRouter::new("en", false).route("en", "es");

    let result = executor::execute(&engine, &cache, &route, &texts(&["hello"]), &[]);

    assert!(matches!(result, Err(TranslationError::NoOptions)));
    assert_eq!(engine.translate_call_count(), 0);
    assert_eq!(engine.pivot_call_count(), 0);
}

#[test]
fn test_executor_execute_withOnlyBlankTexts_shouldFailWithEmptyInput() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "enes");
    let route = PivotRouter::new("en", false).route("en", "es");
    let options = vec![TranslateOptions::default(); 2];

    let result = executor::execute(&engine, &cache, &route, &texts(&["", "   "]), &options);

    assert!(matches!(result, Err(TranslationError::EmptyInput)));
    assert_eq!(engine.translate_call_count(), 0);
}

#[test]
fn test_executor_execute_withBlankEntries_shouldDropThemSilently() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "enes");
    let route = PivotRouter::new("en", false).route("en", "es");
    let options = vec![TranslateOptions::default(); 3];

    let responses =
        executor::execute(&engine, &cache, &route, &texts(&["", "  ", "hello"]), &options).unwrap();

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].source_text(), "hello");
    assert_eq!(engine.last_texts(), vec!["hello".to_string()]);
}

#[test]
fn test_executor_execute_withBlankEntries_shouldMatchPlainRequest() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "enes");
    let route = PivotRouter::new("en", false).route("en", "es");

    let padded = executor::execute(
        &engine,
        &cache,
        &route,
        &texts(&["", "  ", "hello"]),
        &vec![TranslateOptions::default(); 3],
    )
    .unwrap();
    let plain = executor::execute(
        &engine,
        &cache,
        &route,
        &texts(&["hello"]),
        &[TranslateOptions::default()],
    )
    .unwrap();

    assert_eq!(padded.len(), plain.len());
    assert_eq!(padded[0].translated_text(), plain[0].translated_text());
    assert_eq!(padded[0].source_text(), plain[0].source_text());
}

#[test]
fn test_executor_execute_shouldTrimSubmittedTexts() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "enes");
    let route = PivotRouter::new("en", false).route("en", "es");

    executor::execute(
        &engine,
        &cache,
        &route,
        &texts(&["  hello world  "]),
        &[TranslateOptions::default()],
    )
    .unwrap();

    assert_eq!(engine.last_texts(), vec!["hello world".to_string()]);
}

#[test]
fn test_executor_execute_shouldForceAlignmentOption() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "enes");
    let route = PivotRouter::new("en", false).route("en", "es");

    let options = vec![TranslateOptions {
        html: true,
        quality_scores: true,
    }];
    executor::execute(&engine, &cache, &route, &texts(&["hello"]), &options).unwrap();

    let submitted = engine.last_options();
    assert_eq!(submitted.len(), 1);
    assert!(submitted[0].alignment);
    assert!(submitted[0].html);
    assert!(submitted[0].quality_scores);
}

#[test]
fn test_executor_execute_withUnloadedModel_shouldFailWithModelNotLoaded() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    let route = PivotRouter::new("en", false).route("en", "es");

    let result = executor::execute(
        &engine,
        &cache,
        &route,
        &texts(&["hello"]),
        &[TranslateOptions::default()],
    );

    assert!(matches!(result, Err(TranslationError::ModelNotLoaded(pair)) if pair == "enes"));
}

#[test]
fn test_executor_execute_withDirectRoute_shouldUseSingleModelCapability() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "enes");
    let route = PivotRouter::new("en", false).route("en", "es");

    executor::execute(
        &engine,
        &cache,
        &route,
        &texts(&["hello"]),
        &[TranslateOptions::default()],
    )
    .unwrap();

    assert_eq!(engine.translate_call_count(), 1);
    assert_eq!(engine.pivot_call_count(), 0);
}

#[test]
fn test_executor_execute_withPivotRoute_shouldUsePivotingCapability() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "esen");
    load_pair(&engine, &cache, "enfr");
    let route = PivotRouter::new("en", true).route("es", "fr");

    executor::execute(
        &engine,
        &cache,
        &route,
        &texts(&["hola"]),
        &[TranslateOptions::default()],
    )
    .unwrap();

    assert_eq!(engine.pivot_call_count(), 1);
    assert_eq!(engine.translate_call_count(), 0);
}

#[test]
fn test_executor_execute_withPivotRouteMissingSecondHop_shouldFail() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    load_pair(&engine, &cache, "esen");
    let route = PivotRouter::new("en", true).route("es", "fr");

    let result = executor::execute(
        &engine,
        &cache,
        &route,
        &texts(&["hola"]),
        &[TranslateOptions::default()],
    );

    assert!(matches!(result, Err(TranslationError::ModelNotLoaded(pair)) if pair == "enfr"));
}
