/*!
 * Routing between direct and pivoted translation.
 *
 * Pure decision logic: given source and target language codes, decide
 * whether a request is satisfied by one model or must chain two models
 * through the configured pivot language.
 */

use crate::language_utils::LanguagePair;

/// How a translation request is satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// One model translates source to target directly
    Direct {
        /// The pair to translate with
        pair: LanguagePair,
    },

    /// Two models chain through the pivot language
    Pivot {
        /// First hop: source to pivot
        source_to_pivot: LanguagePair,
        /// Second hop: pivot to target
        pivot_to_target: LanguagePair,
    },
}

impl Route {
    /// The language pairs this route needs models for, in invocation order
    pub fn pairs(&self) -> Vec<&LanguagePair> {
        match self {
            Self::Direct { pair } => vec![pair],
            Self::Pivot {
                source_to_pivot,
                pivot_to_target,
            } => vec![source_to_pivot, pivot_to_target],
        }
    }
}

/// Decides between direct and pivoted routing
#[derive(Debug, Clone)]
pub struct PivotRouter {
    /// The fixed intermediate language
    pivot_language: String,

    /// Whether two-hop routing is enabled at all.
    /// Off by default; the pivoting path stays available behind this toggle.
    pivoting_enabled: bool,
}

impl PivotRouter {
    /// Create a router for the given pivot language and policy
    pub fn new(pivot_language: &str, pivoting_enabled: bool) -> Self {
        Self {
            pivot_language: pivot_language.to_string(),
            pivoting_enabled,
        }
    }

    /// The configured pivot language
    pub fn pivot_language(&self) -> &str {
        &self.pivot_language
    }

    /// Whether a request from `from` to `to` must chain through the pivot
    pub fn pivoting_required(&self, from: &str, to: &str) -> bool {
        self.pivoting_enabled && from != self.pivot_language && to != self.pivot_language
    }

    /// Route a request
    pub fn route(&self, from: &str, to: &str) -> Route {
        if self.pivoting_required(from, to) {
            Route::Pivot {
                source_to_pivot: LanguagePair::new(from, &self.pivot_language),
                pivot_to_target: LanguagePair::new(&self.pivot_language, to),
            }
        } else {
            Route::Direct {
                pair: LanguagePair::new(from, to),
            }
        }
    }
}
