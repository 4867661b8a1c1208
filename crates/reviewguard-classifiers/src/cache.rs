//! Read-through keyword profile cache
//!
//! Memoizes per-product (keywords, contrasts) pairs for the process
//! lifetime, keyed by the exact product-name string. Oracle failures degrade
//! to a minimal profile instead of propagating; the degraded profile is
//! cached like any other. Population is last-write-wins: concurrent first
//! requests for one uncached name may each call the oracle.

use crate::config::EngineConfig;
use crate::oracle::{contrast_prompt, keyword_prompt, parse_term_list, KeywordOracle};
use moka::sync::Cache;
use reviewguard_core::{Error, KeywordProfile, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Size-capped cache over the keyword oracle
pub struct KeywordProfileCache {
    oracle: Arc<dyn KeywordOracle>,
    profiles: Cache<String, Arc<KeywordProfile>>,
    timeout: Duration,
    max_keywords: usize,
    max_contrasts: usize,
}

impl KeywordProfileCache {
    /// Create a cache backed by the given oracle
    pub fn new(oracle: Arc<dyn KeywordOracle>, config: &EngineConfig) -> Self {
        Self {
            oracle,
            profiles: Cache::new(config.cache_capacity),
            timeout: config.oracle_timeout,
            max_keywords: config.max_profile_keywords,
            max_contrasts: config.max_profile_contrasts,
        }
    }

    /// Profile for a product name, fetching and memoizing on first use
    ///
    /// Never fails: any oracle problem yields the degraded profile.
    pub async fn get_profile(&self, product_name: &str) -> Arc<KeywordProfile> {
        if let Some(profile) = self.profiles.get(product_name) {
            return profile;
        }

        debug!(product = product_name, "keyword profile cache miss");
        let profile = Arc::new(self.fetch_profile(product_name).await);
        self.profiles
            .insert(product_name.to_string(), Arc::clone(&profile));
        profile
    }

    /// Drop a cached profile so the next request recomputes it
    pub fn invalidate(&self, product_name: &str) {
        self.profiles.invalidate(product_name);
    }

    /// Number of cached profiles (approximate under concurrency)
    pub fn len(&self) -> u64 {
        self.profiles.run_pending_tasks();
        self.profiles.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issue the keyword and contrast prompts concurrently and assemble a
    /// profile, degrading each half independently on failure
    async fn fetch_profile(&self, product_name: &str) -> KeywordProfile {
        let kw_prompt = keyword_prompt(product_name, self.max_keywords);
        let ct_prompt = contrast_prompt(product_name, self.max_contrasts);

        let (kw_response, ct_response) =
            tokio::join!(self.bounded(&kw_prompt), self.bounded(&ct_prompt));

        let keywords = match kw_response {
            Ok(raw) => {
                let terms = parse_term_list(&raw, self.max_keywords);
                if terms.is_empty() {
                    warn!(product = product_name, "oracle returned no usable keywords");
                    vec![product_name.to_lowercase()]
                } else {
                    terms
                }
            }
            Err(e) => {
                warn!(product = product_name, error = %e, "keyword fetch degraded");
                vec![product_name.to_lowercase()]
            }
        };

        let contrasts = match ct_response {
            Ok(raw) => parse_term_list(&raw, self.max_contrasts),
            Err(e) => {
                warn!(product = product_name, error = %e, "contrast fetch degraded");
                Vec::new()
            }
        };

        KeywordProfile::new(keywords, contrasts)
    }

    async fn bounded(&self, prompt: &str) -> Result<String> {
        tokio::time::timeout(self.timeout, self.oracle.complete(prompt))
            .await
            .map_err(|_| Error::Timeout)?
    }
}
