/*!
 * Projection of engine responses into plain results.
 *
 * The engine reports sentence boundaries as byte offsets into the UTF-8
 * encoding of each text. Those offsets do not generally fall on char
 * boundaries for multi-byte languages, so slicing must happen on the encoded
 * bytes, never on char indices.
 */

use crate::engine::{ByteRange, EngineResponse};

/// The plain result of translating one input text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// The whole translated text
    pub translated_text: String,

    /// Per-sentence substrings of the translated text
    pub translated_sentences: Vec<String>,

    /// The whole source text as the engine saw it
    pub source_text: String,

    /// Per-sentence substrings of the source text
    pub source_sentences: Vec<String>,
}

/// Convert engine responses into results, ordered like the submitted texts
pub fn project(responses: &[EngineResponse]) -> Vec<TranslationResult> {
    responses
        .iter()
        .map(|response| {
            let translated_text = response.translated_text().to_string();
            let source_text = response.source_text().to_string();

            let mut translated_sentences = Vec::with_capacity(response.sentence_count());
            let mut source_sentences = Vec::with_capacity(response.sentence_count());
            for index in 0..response.sentence_count() {
                if let Some(range) = response.translated_sentence(index) {
                    translated_sentences.push(byte_range_substring(&translated_text, range));
                }
                if let Some(range) = response.source_sentence(index) {
                    source_sentences.push(byte_range_substring(&source_text, range));
                }
            }

            TranslationResult {
                translated_text,
                translated_sentences,
                source_text,
                source_sentences,
            }
        })
        .collect()
}

/// Slice `[begin, end)` out of the UTF-8 byte encoding of `text` and decode
/// the bytes back to a string.
///
/// Offsets are clamped to the byte length, and decoding is lossy so a range
/// that splits a multi-byte sequence yields replacement characters instead
/// of failing.
pub fn byte_range_substring(text: &str, range: ByteRange) -> String {
    let bytes = text.as_bytes();
    let begin = range.begin.min(bytes.len());
    let end = range.end.min(bytes.len()).max(begin);
    String::from_utf8_lossy(&bytes[begin..end]).into_owned()
}
