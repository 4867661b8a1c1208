//! Engine configuration
//!
//! All thresholds are explicit values passed into the engine so tests can
//! vary them without global state.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the genuineness engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Comments shorter than this (after trimming) are rejected outright
    #[serde(default = "default_min_comment_len")]
    pub min_comment_len: usize,

    /// Minimum oracle keyword substring matches for the oracle verifier
    #[serde(default = "default_min_keyword_matches")]
    pub min_keyword_matches: usize,

    /// Maximum absolute sentiment magnitude the oracle verifier accepts
    #[serde(default = "default_sentiment_limit")]
    pub sentiment_limit: f32,

    /// A batch passes only if its genuine fraction strictly exceeds this
    #[serde(default = "default_batch_genuine_ratio")]
    pub batch_genuine_ratio: f32,

    /// Maximum keywords kept from one oracle response
    #[serde(default = "default_max_profile_keywords")]
    pub max_profile_keywords: usize,

    /// Maximum contrast terms kept from one oracle response
    #[serde(default = "default_max_profile_contrasts")]
    pub max_profile_contrasts: usize,

    /// Upper bound on a single oracle call before degrading
    #[serde(default = "default_oracle_timeout", with = "duration_secs")]
    pub oracle_timeout: Duration,

    /// Maximum number of keyword profiles held in the cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_comment_len: default_min_comment_len(),
            min_keyword_matches: default_min_keyword_matches(),
            sentiment_limit: default_sentiment_limit(),
            batch_genuine_ratio: default_batch_genuine_ratio(),
            max_profile_keywords: default_max_profile_keywords(),
            max_profile_contrasts: default_max_profile_contrasts(),
            oracle_timeout: default_oracle_timeout(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_min_comment_len() -> usize {
    10
}

fn default_min_keyword_matches() -> usize {
    2
}

fn default_sentiment_limit() -> f32 {
    8.0
}

fn default_batch_genuine_ratio() -> f32 {
    0.7
}

fn default_max_profile_keywords() -> usize {
    50
}

fn default_max_profile_contrasts() -> usize {
    5
}

fn default_oracle_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_cache_capacity() -> u64 {
    1024
}

/// Serialize the oracle timeout as whole seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}
