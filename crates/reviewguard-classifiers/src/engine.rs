//! Genuineness decision engine
//!
//! The externally visible entry points. Per-review classification is a
//! linear state machine with no backtracking: pattern gate first (cheapest,
//! deterministic, no external cost), then the oracle verifier, then the
//! category fallback. Per review the engine fails open (oracle outages
//! degrade, the caller always gets a boolean); per batch it fails closed
//! (any unexpected internal failure marks the batch incoherent).

use crate::cache::KeywordProfileCache;
use crate::category::CategoryTable;
use crate::config::EngineConfig;
use crate::oracle::KeywordOracle;
use crate::patterns::PatternFilter;
use crate::verifier::{CategoryVerifier, OracleVerifier};
use futures::future::join_all;
use reviewguard_core::{Product, Result, Review};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Review genuineness classification engine
pub struct GenuinenessEngine {
    config: EngineConfig,
    filter: PatternFilter,
    oracle_verifier: OracleVerifier,
    category_verifier: CategoryVerifier,
    cache: Arc<KeywordProfileCache>,
}

impl GenuinenessEngine {
    /// Create an engine over the given oracle, category table, and config
    pub fn new(
        oracle: Arc<dyn KeywordOracle>,
        table: CategoryTable,
        config: EngineConfig,
    ) -> Result<Self> {
        let cache = Arc::new(KeywordProfileCache::new(oracle, &config));
        let filter = PatternFilter::new(config.min_comment_len)?;
        let oracle_verifier = OracleVerifier::new(Arc::clone(&cache), &config)?;
        let category_verifier = CategoryVerifier::new(table);

        Ok(Self {
            config,
            filter,
            oracle_verifier,
            category_verifier,
            cache,
        })
    }

    /// Create an engine with the embedded category dictionary
    pub fn with_builtin_table(
        oracle: Arc<dyn KeywordOracle>,
        config: EngineConfig,
    ) -> Result<Self> {
        Self::new(oracle, CategoryTable::builtin()?, config)
    }

    /// Classify one review; never panics or propagates errors
    ///
    /// Stage order is load-bearing: the pattern gate runs before any oracle
    /// call, the oracle verdict is the primary signal, and the category
    /// table is only a safety net against oracle degradation.
    pub async fn is_genuine_review(&self, review: &Review, product: &Product) -> bool {
        if self.filter.is_obviously_fake(&review.comment) {
            debug!(
                product = %product.name,
                rule = self.filter.first_match(&review.comment).unwrap_or("too_short"),
                "pattern filter reject"
            );
            return false;
        }

        if self.oracle_verifier.verify(review, product).await {
            return true;
        }

        self.category_verifier.verify(review, product)
    }

    /// Evaluate a batch of reviews for one product for coordinated-fraud
    /// signals; fails closed on any unexpected internal error
    pub async fn analyze_review_batch(&self, reviews: &[Review], product: &Product) -> bool {
        match self.analyze_batch_inner(reviews, product).await {
            Ok(coherent) => coherent,
            Err(e) => {
                warn!(product = %product.name, error = %e, "batch analysis failed closed");
                false
            }
        }
    }

    async fn analyze_batch_inner(&self, reviews: &[Review], product: &Product) -> Result<bool> {
        if reviews.is_empty() {
            return Ok(false);
        }

        // Pre-checks short-circuit before any oracle call is made
        let mut seen = HashSet::with_capacity(reviews.len());
        for review in reviews {
            match review.reviewer.as_deref().map(str::trim) {
                Some(id) if !id.is_empty() => {}
                _ => {
                    debug!(product = %product.name, "batch reject: missing reviewer identity");
                    return Ok(false);
                }
            }
            if !seen.insert(review.normalized_comment()) {
                debug!(product = %product.name, "batch reject: duplicate comment text");
                return Ok(false);
            }
        }

        // Verdicts are independent; classify the whole batch concurrently
        let verdicts = join_all(
            reviews
                .iter()
                .map(|review| self.is_genuine_review(review, product)),
        )
        .await;

        let genuine = verdicts.iter().filter(|v| **v).count();
        let fraction = genuine as f32 / reviews.len() as f32;
        debug!(
            product = %product.name,
            genuine,
            total = reviews.len(),
            fraction,
            "batch classified"
        );

        // Strictly greater than the threshold; an exactly-at-ratio batch fails
        Ok(fraction > self.config.batch_genuine_ratio)
    }

    /// The keyword profile cache, exposed for invalidation and inspection
    pub fn profile_cache(&self) -> &KeywordProfileCache {
        &self.cache
    }

    /// The engine's configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedOracle(&'static str, &'static str);

    #[async_trait]
    impl KeywordOracle for FixedOracle {
        async fn complete(&self, prompt: &str) -> Result<String> {
            if prompt.contains("would never describe") {
                Ok(self.1.to_string())
            } else {
                Ok(self.0.to_string())
            }
        }
    }

    fn engine(oracle: FixedOracle, table_json: &str) -> GenuinenessEngine {
        GenuinenessEngine::new(
            Arc::new(oracle),
            CategoryTable::from_json_str(table_json).unwrap(),
            EngineConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_oracle_accept_is_terminal() {
        // Empty category table: only the oracle verifier can accept
        let engine = engine(FixedOracle("sound, battery", ""), "{}");
        let review = Review::new("the sound is fine and battery lasted a week");
        let product = Product::new("Wireless Headphone X200");

        assert!(engine.is_genuine_review(&review, &product).await);
    }

    #[tokio::test]
    async fn test_fallback_verdict_is_final() {
        // Oracle rejects (no keyword overlap); empty table and no name words
        // in the comment leave nothing to accept on
        let engine = engine(FixedOracle("latency, codec", ""), "{}");
        let review = Review::new("arrived on time and the packaging was intact");
        let product = Product::new("Wireless Headphone X200");

        assert!(!engine.is_genuine_review(&review, &product).await);
    }

    #[tokio::test]
    async fn test_batch_single_genuine_review_passes() {
        let engine = engine(FixedOracle("sound, battery", ""), "{}");
        let reviews = vec![
            Review::new("the sound is fine and battery lasted a week").with_reviewer("a"),
        ];
        let product = Product::new("Wireless Headphone X200");

        // 1/1 = 1.0 > 0.7
        assert!(engine.analyze_review_batch(&reviews, &product).await);
    }
}
