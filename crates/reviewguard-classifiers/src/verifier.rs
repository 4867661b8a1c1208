//! Oracle-based and category-fallback verifiers
//!
//! The oracle verifier is the primary signal: it checks how many cached
//! oracle keywords the comment mentions, vetoes on any contrast term, and
//! treats extreme polarization as a fabrication signal. The category
//! verifier is a looser second chance reached only when the oracle verifier
//! rejects.

use crate::cache::KeywordProfileCache;
use crate::category::{infer_category, CategoryTable};
use crate::config::EngineConfig;
use crate::sentiment::SentimentScorer;
use reviewguard_core::{Product, Result, Review};
use std::sync::Arc;
use tracing::debug;

/// Primary verifier backed by the keyword oracle cache
pub struct OracleVerifier {
    cache: Arc<KeywordProfileCache>,
    scorer: SentimentScorer,
    min_keyword_matches: usize,
    sentiment_limit: f32,
}

impl OracleVerifier {
    pub fn new(cache: Arc<KeywordProfileCache>, config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            cache,
            scorer: SentimentScorer::new()?,
            min_keyword_matches: config.min_keyword_matches,
            sentiment_limit: config.sentiment_limit,
        })
    }

    /// Accept or reject a review against the product's keyword profile
    pub async fn verify(&self, review: &Review, product: &Product) -> bool {
        let profile = self.cache.get_profile(&product.name).await;
        let comment = review.normalized_comment();

        // Contrast-term presence always wins, regardless of keyword matches
        if let Some(term) = profile.contrasts.iter().find(|c| comment.contains(c.as_str())) {
            debug!(product = %product.name, term = %term, "contrast veto");
            return false;
        }

        let matched = profile
            .keywords
            .iter()
            .filter(|k| comment.contains(k.as_str()))
            .count();
        if matched < self.min_keyword_matches {
            debug!(
                product = %product.name,
                matched,
                required = self.min_keyword_matches,
                "too few keyword matches"
            );
            return false;
        }

        // Correct keywords with extreme polarization still read as fabricated
        let magnitude = self.scorer.score(&comment).abs();
        if magnitude > self.sentiment_limit {
            debug!(product = %product.name, magnitude, "polarization over limit");
            return false;
        }

        true
    }
}

/// Fallback verifier over the static category keyword table
pub struct CategoryVerifier {
    table: CategoryTable,
}

impl CategoryVerifier {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    /// Accept when the comment mentions any category keyword or any
    /// whitespace-delimited word from the product name
    pub fn verify(&self, review: &Review, product: &Product) -> bool {
        let comment = review.normalized_comment();

        let tag = match &product.category {
            Some(tag) => tag.to_lowercase(),
            None => infer_category(&product.name).to_string(),
        };

        if self
            .table
            .keywords(&tag)
            .iter()
            .any(|k| comment.contains(k.as_str()))
        {
            return true;
        }

        product
            .name
            .to_lowercase()
            .split_whitespace()
            .any(|word| comment.contains(word))
    }
}
