/*!
 * Tests for model cache ownership
 */

use bergamot_session::engine::mock::MockEngine;
use bergamot_session::engine::{AlignedBuffer, Engine, ModelBuffers, ModelHandle};
use bergamot_session::session::ModelCache;

fn construct_model(engine: &MockEngine) -> ModelHandle {
    let buffers = ModelBuffers {
        weights: AlignedBuffer::from_bytes(b"weights", 256).unwrap(),
        shortlist: AlignedBuffer::from_bytes(b"lex", 64).unwrap(),
        vocabularies: vec![AlignedBuffer::from_bytes(b"vocab", 64).unwrap()],
        quality_model: None,
    };
    engine.new_model("config", buffers).unwrap()
}

#[test]
fn test_cache_new_shouldBeEmpty() {
    let cache = ModelCache::new();
    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
}

#[test]
fn test_cache_insert_shouldStoreHandle() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    let handle = construct_model(&engine);

    cache.insert("enes", handle);
    assert_eq!(cache.get("enes"), Some(handle));
    assert!(cache.contains("enes"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_cache_get_withMissingKey_shouldReturnNone() {
    let cache = ModelCache::new();
    assert!(cache.get("enes").is_none());
    assert!(!cache.contains("enes"));
}

#[test]
fn test_cache_clearAll_shouldReleaseEveryHandle() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    cache.insert("enes", construct_model(&engine));
    cache.insert("enfr", construct_model(&engine));
    assert_eq!(engine.live_model_count(), 2);

    let released = cache.clear_all(&engine);

    assert_eq!(released, 2);
    assert_eq!(engine.released_count(), 2);
    assert_eq!(engine.live_model_count(), 0);
    assert!(cache.is_empty());
}

#[test]
fn test_cache_clearAll_withEmptyCache_shouldReleaseNothing() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    assert_eq!(cache.clear_all(&engine), 0);
    assert_eq!(engine.released_count(), 0);
}

#[test]
fn test_cache_insert_withSameKey_shouldOverwriteWithoutReleasing() {
    let engine = MockEngine::working();
    let cache = ModelCache::new();
    let first = construct_model(&engine);
    let second = construct_model(&engine);

    cache.insert("enes", first);
    cache.insert("enes", second);

    // Overwrite does not release; that is the caller's responsibility
    assert_eq!(cache.get("enes"), Some(second));
    assert_eq!(engine.released_count(), 0);
    assert_eq!(engine.live_model_count(), 2);
}
