/*!
 * Capability interface for the underlying inference engine.
 *
 * The orchestrator never talks to a concrete engine directly; it depends on
 * the `Engine` trait, which covers model construction, single and pivoting
 * translation, and response introspection. This keeps the engine swappable
 * with a test double.
 *
 * Submodules:
 * - `mock`: In-memory engine double used by the test suite
 */

use async_trait::async_trait;
use std::alloc::{self, Layout};
use std::fmt::Debug;
use std::ptr::NonNull;

use crate::app_config::EngineServiceConfig;
use crate::errors::{AssetError, EngineError};

pub mod mock;

/// A memory region whose starting address satisfies a required byte
/// alignment, as needed by the engine's memory-mapped tensor layout.
///
/// The buffer exclusively owns its allocation; ownership transfers to the
/// engine together with the containing `ModelBuffers` at model construction.
pub struct AlignedBuffer {
    ptr: NonNull<u8>,
    len: usize,
    alignment: usize,
}

// The buffer is an exclusively owned allocation, no shared mutation.
unsafe impl Send for AlignedBuffer {}
unsafe impl Sync for AlignedBuffer {}

impl AlignedBuffer {
    /// Copy `bytes` into a fresh allocation aligned to `alignment`
    pub fn from_bytes(bytes: &[u8], alignment: usize) -> Result<Self, AssetError> {
        if alignment == 0 || !alignment.is_power_of_two() {
            return Err(AssetError::InvalidAlignment(alignment));
        }

        if bytes.is_empty() {
            // Zero-length buffers never dereference the pointer; a
            // well-aligned dangling pointer is enough.
            let ptr = NonNull::new(std::ptr::without_provenance_mut(alignment))
                .ok_or(AssetError::InvalidAlignment(alignment))?;
            return Ok(Self {
                ptr,
                len: 0,
                alignment,
            });
        }

        let layout = Layout::from_size_align(bytes.len(), alignment)
            .map_err(|_| AssetError::InvalidAlignment(alignment))?;
        let raw = unsafe { alloc::alloc(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len());
        }

        Ok(Self {
            ptr,
            len: bytes.len(),
            alignment,
        })
    }

    /// Buffer content
    pub fn as_slice(&self) -> &[u8] {
        if self.len == 0 {
            return &[];
        }
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Size of the buffer in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alignment the buffer was constructed with
    pub fn alignment(&self) -> usize {
        self.alignment
    }
}

impl Drop for AlignedBuffer {
    fn drop(&mut self) {
        if self.len > 0 {
            // Same size/alignment the buffer was allocated with
            let layout = unsafe { Layout::from_size_align_unchecked(self.len, self.alignment) };
            unsafe { alloc::dealloc(self.ptr.as_ptr(), layout) };
        }
    }
}

impl Debug for AlignedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("alignment", &self.alignment)
            .finish()
    }
}

/// Opaque identifier for a loaded translation model.
///
/// The engine owns the resource behind the handle; the model cache owns the
/// handle itself and must release it through `Engine::release_model` before
/// discarding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle(u64);

impl ModelHandle {
    /// Wrap a raw engine-assigned id
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw engine-assigned id
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Aligned memory blocks handed to the engine when constructing one model
#[derive(Debug)]
pub struct ModelBuffers {
    /// Model weights
    pub weights: AlignedBuffer,

    /// Lexical shortlist
    pub shortlist: AlignedBuffer,

    /// Vocabulary files; a single shared vocabulary is the common case
    pub vocabularies: Vec<AlignedBuffer>,

    /// Optional quality estimation model
    pub quality_model: Option<AlignedBuffer>,
}

/// Per-text options for one engine response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseOptions {
    /// Whether the engine should attach quality scores
    pub quality_scores: bool,

    /// Whether the engine should compute word alignments
    pub alignment: bool,

    /// Whether the text is HTML and tags must be preserved
    pub html: bool,
}

/// A `[begin, end)` offset pair into the UTF-8 byte encoding of a text,
/// marking one sentence's span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Inclusive start offset
    pub begin: usize,
    /// Exclusive end offset
    pub end: usize,
}

impl ByteRange {
    /// Create a range from begin/end offsets
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }
}

/// One translation response produced by the engine.
///
/// Owns all of its data; dropping the response releases it on every exit
/// path, which stands in for the engine-side vector cleanup of the native
/// implementation.
#[derive(Debug, Clone)]
pub struct EngineResponse {
    source_text: String,
    translated_text: String,
    source_sentences: Vec<ByteRange>,
    translated_sentences: Vec<ByteRange>,
}

impl EngineResponse {
    /// Assemble a response from its parts.
    ///
    /// The two sentence lists are parallel: entry `i` of each describes the
    /// same sentence on the source and translated side.
    pub fn new(
        source_text: String,
        translated_text: String,
        source_sentences: Vec<ByteRange>,
        translated_sentences: Vec<ByteRange>,
    ) -> Self {
        Self {
            source_text,
            translated_text,
            source_sentences,
            translated_sentences,
        }
    }

    /// Whole translated text
    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    /// Whole original source text
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Number of sentences the engine segmented the text into
    pub fn sentence_count(&self) -> usize {
        self.translated_sentences.len()
    }

    /// Byte range of sentence `index` within the translated text
    pub fn translated_sentence(&self, index: usize) -> Option<ByteRange> {
        self.translated_sentences.get(index).copied()
    }

    /// Byte range of sentence `index` within the source text
    pub fn source_sentence(&self, index: usize) -> Option<ByteRange> {
        self.source_sentences.get(index).copied()
    }
}

/// Common trait for inference engines.
///
/// Initialization is asynchronous (the runtime signals readiness); model
/// construction and translation are blocking, CPU-bound calls that occupy
/// the caller for their full duration.
#[async_trait]
pub trait Engine: Send + Sync + Debug {
    /// Bring up the engine runtime with its translation-service settings;
    /// awaited exactly once by engine import
    async fn initialize(&self, config: &EngineServiceConfig) -> Result<(), EngineError>;

    /// Construct a translation model from a decoder configuration string and
    /// aligned memory blocks; buffer ownership transfers to the engine
    fn new_model(&self, config: &str, buffers: ModelBuffers) -> Result<ModelHandle, EngineError>;

    /// Release the engine-side resources behind a model handle
    fn release_model(&self, handle: ModelHandle);

    /// Translate `texts` with a single model
    fn translate(
        &self,
        model: ModelHandle,
        texts: &[String],
        options: &[ResponseOptions],
    ) -> Result<Vec<EngineResponse>, EngineError>;

    /// Translate `texts` in two stages: source-to-pivot, then pivot-to-target
    fn translate_via_pivoting(
        &self,
        source_to_pivot: ModelHandle,
        pivot_to_target: ModelHandle,
        texts: &[String],
        options: &[ResponseOptions],
    ) -> Result<Vec<EngineResponse>, EngineError>;
}
