/*!
 * Tests for error types and conversions
 */

use bergamot_session::errors::{AssetError, EngineError, SessionError, TranslationError};

#[test]
fn test_assetError_unavailable_shouldDisplayCorrectly() {
    let error = AssetError::Unavailable("connection refused".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Asset unavailable"));
    assert!(display.contains("connection refused"));
}

#[test]
fn test_assetError_http_shouldDisplayStatusAndUrl() {
    let error = AssetError::Http {
        status: 404,
        url: "https://example.com/model.bin".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("404"));
    assert!(display.contains("https://example.com/model.bin"));
}

#[test]
fn test_assetError_checksumMismatch_shouldDisplayDigests() {
    let error = AssetError::ChecksumMismatch {
        location: "model.bin".to_string(),
        expected: "aaaa".to_string(),
        actual: "bbbb".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("aaaa"));
    assert!(display.contains("bbbb"));
}

#[test]
fn test_engineError_constructionFailed_shouldDisplayCorrectly() {
    let error = EngineError::ConstructionFailed("bad vocab".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Model construction failed"));
    assert!(display.contains("bad vocab"));
}

#[test]
fn test_translationError_modelNotLoaded_shouldNamePair() {
    let error = TranslationError::ModelNotLoaded("enes".to_string());
    let display = format!("{}", error);
    assert!(display.contains("enes"));
    assert!(display.contains("not loaded"));
}

#[test]
fn test_translationError_fromEngineError_shouldWrap() {
    let error: TranslationError =
        EngineError::TranslationFailed("decoder crashed".to_string()).into();
    assert!(matches!(error, TranslationError::Engine(_)));
    assert!(format!("{}", error).contains("decoder crashed"));
}

#[test]
fn test_sessionError_fromAssetError_shouldWrap() {
    let error: SessionError = AssetError::Unavailable("gone".to_string()).into();
    assert!(matches!(error, SessionError::Asset(_)));
}

#[test]
fn test_sessionError_fromTranslationError_shouldWrap() {
    let error: SessionError = TranslationError::EmptyInput.into();
    assert!(matches!(error, SessionError::Translation(_)));
    assert!(format!("{}", error).contains("No text provided"));
}
