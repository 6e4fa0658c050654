use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Session configuration module
/// This module handles the orchestrator configuration including loading,
/// validating and serializing configuration settings.
/// Represents the configuration of one translation session
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionConfig {
    /// Intermediate language used when no direct model exists
    #[serde(default = "default_pivot_language")]
    pub pivot_language: String,

    /// Whether two-hop routing through the pivot language is enabled.
    /// The reference behavior keeps this off; the routing code path stays
    /// in place either way.
    #[serde(default)]
    pub enable_pivoting: bool,

    /// Whether downloaded assets are checked against the registry checksums
    #[serde(default)]
    pub verify_checksums: bool,

    /// Engine service configuration
    #[serde(default)]
    pub engine: EngineServiceConfig,

    /// Per-model decoder configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pivot_language: default_pivot_language(),
            enable_pivoting: false,
            verify_checksums: false,
            engine: EngineServiceConfig::default(),
            model: ModelConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl SessionConfig {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.pivot_language)?;
        self.model.validate()?;
        Ok(())
    }
}

/// Configuration of the blocking translation service inside the engine
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineServiceConfig {
    /// Size of the engine's internal translation cache, in entries
    #[serde(default = "default_engine_cache_size")]
    pub cache_size: usize,
}

impl Default for EngineServiceConfig {
    fn default() -> Self {
        Self {
            cache_size: default_engine_cache_size(),
        }
    }
}

/// Decoder configuration passed to the engine for every constructed model.
///
/// The engine consumes this as a fixed-format string of `key: value` lines,
/// one per field. Defaults match the settings the Bergamot decoder is tuned
/// for; change them only if you know what the decoder does with them.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelConfig {
    /// Beam size used during decoding
    #[serde(default = "default_beam_size")]
    pub beam_size: u32,

    /// Length normalization exponent
    #[serde(default = "default_normalize")]
    pub normalize: f32,

    /// Per-word penalty added to hypothesis scores
    #[serde(default)]
    pub word_penalty: u32,

    /// Maximum source length before the input is broken up
    #[serde(default = "default_max_length_break")]
    pub max_length_break: u32,

    /// Maximum number of words per mini-batch
    #[serde(default = "default_mini_batch_words")]
    pub mini_batch_words: u32,

    /// Decoder workspace in megabytes
    #[serde(default = "default_workspace")]
    pub workspace: u32,

    /// Maximum output/input length ratio
    #[serde(default = "default_max_length_factor")]
    pub max_length_factor: u32,

    /// Whether cost computation is skipped
    #[serde(default)]
    pub skip_cost: bool,

    /// Number of CPU threads the decoder may use (0 = engine default)
    #[serde(default)]
    pub cpu_threads: u32,

    /// GEMM precision mode
    #[serde(default = "default_gemm_precision")]
    pub gemm_precision: String,

    /// Alignment mode reported in responses
    #[serde(default = "default_alignment_mode")]
    pub alignment: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            beam_size: default_beam_size(),
            normalize: default_normalize(),
            word_penalty: 0,
            max_length_break: default_max_length_break(),
            mini_batch_words: default_mini_batch_words(),
            workspace: default_workspace(),
            max_length_factor: default_max_length_factor(),
            skip_cost: false,
            cpu_threads: 0,
            gemm_precision: default_gemm_precision(),
            alignment: default_alignment_mode(),
        }
    }
}

impl ModelConfig {
    /// Validate decoder constraints
    pub fn validate(&self) -> Result<()> {
        // The decoder requires max-length-factor * max-length-break < mini-batch-words;
        // an overflowing product can never satisfy that, so it is invalid too
        let max_batch_demand = self
            .max_length_factor
            .checked_mul(self.max_length_break)
            .unwrap_or(u32::MAX);
        if max_batch_demand >= self.mini_batch_words {
            return Err(anyhow!(
                "Invalid model config: max-length-factor ({}) * max-length-break ({}) must be below mini-batch-words ({})",
                self.max_length_factor,
                self.max_length_break,
                self.mini_batch_words
            ));
        }
        Ok(())
    }

    /// Render the configuration as the `key: value` lines the engine expects.
    ///
    /// The engine parses this format verbatim, so the keys and the single
    /// space after each colon must not change.
    pub fn to_config_string(&self) -> String {
        format!(
            "beam-size: {}\n\
             normalize: {:.1}\n\
             word-penalty: {}\n\
             max-length-break: {}\n\
             mini-batch-words: {}\n\
             workspace: {}\n\
             max-length-factor: {}\n\
             skip-cost: {}\n\
             cpu-threads: {}\n\
             quiet: true\n\
             quiet-translation: true\n\
             gemm-precision: {}\n\
             alignment: {}\n",
            self.beam_size,
            self.normalize,
            self.word_penalty,
            self.max_length_break,
            self.mini_batch_words,
            self.workspace,
            self.max_length_factor,
            self.skip_cost,
            self.cpu_threads,
            self.gemm_precision,
            self.alignment
        )
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_pivot_language() -> String {
    "en".to_string()
}

fn default_engine_cache_size() -> usize {
    20000
}

fn default_beam_size() -> u32 {
    12
}

fn default_normalize() -> f32 {
    1.0
}

fn default_max_length_break() -> u32 {
    512
}

fn default_mini_batch_words() -> u32 {
    8192
}

fn default_workspace() -> u32 {
    512
}

fn default_max_length_factor() -> u32 {
    12
}

fn default_gemm_precision() -> String {
    "int8shiftAlphaAll".to_string()
}

fn default_alignment_mode() -> String {
    "soft".to_string()
}
