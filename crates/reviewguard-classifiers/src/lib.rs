//! ReviewGuard Classifiers
//!
//! The review-genuineness classification engine: a staged pipeline that
//! decides whether a submitted product review is authentic or fabricated.
//!
//! Stages, leaves first:
//! - Pattern filter: deterministic lexical rules, no external calls
//! - Keyword oracle cache: memoized per-product keyword/contrast profiles
//! - Sentiment scorer: polarity-lexicon intensity estimate
//! - Oracle verifier: keyword matches + contrast veto + polarization limit
//! - Category fallback verifier: static category dictionary safety net
//! - Genuineness engine: per-review decision and batch coherence checking

pub mod cache;
pub mod category;
pub mod config;
pub mod engine;
pub mod oracle;
pub mod patterns;
pub mod sentiment;
pub mod verifier;

pub use cache::KeywordProfileCache;
pub use category::{infer_category, CategoryTable, UNKNOWN_CATEGORY};
pub use config::EngineConfig;
pub use engine::GenuinenessEngine;
pub use oracle::{contrast_prompt, keyword_prompt, parse_term_list, KeywordOracle, OpenAiOracle};
pub use patterns::{PatternFilter, PatternRule};
pub use sentiment::SentimentScorer;
pub use verifier::{CategoryVerifier, OracleVerifier};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cache::KeywordProfileCache;
    pub use crate::category::{infer_category, CategoryTable};
    pub use crate::config::EngineConfig;
    pub use crate::engine::GenuinenessEngine;
    pub use crate::oracle::{KeywordOracle, OpenAiOracle};
    pub use crate::patterns::PatternFilter;
    pub use crate::sentiment::SentimentScorer;
    pub use crate::verifier::{CategoryVerifier, OracleVerifier};
    pub use reviewguard_core::prelude::*;
}
