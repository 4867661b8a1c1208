//! End-to-end tests for the genuineness engine over mock oracles

use async_trait::async_trait;
use reviewguard_classifiers::{EngineConfig, GenuinenessEngine, KeywordOracle};
use reviewguard_core::{Error, Product, Result, Review};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Oracle returning fixed keyword/contrast lists, counting calls
struct FixedOracle {
    keywords: String,
    contrasts: String,
    calls: AtomicUsize,
}

impl FixedOracle {
    fn new(keywords: &str, contrasts: &str) -> Arc<Self> {
        Arc::new(Self {
            keywords: keywords.to_string(),
            contrasts: contrasts.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeywordOracle for FixedOracle {
    async fn complete(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.contains("would never describe") {
            Ok(self.contrasts.clone())
        } else {
            Ok(self.keywords.clone())
        }
    }
}

/// Oracle that always fails
struct DownOracle;

#[async_trait]
impl KeywordOracle for DownOracle {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Err(Error::oracle("connection refused"))
    }
}

fn engine_with(oracle: Arc<dyn KeywordOracle>) -> GenuinenessEngine {
    GenuinenessEngine::with_builtin_table(oracle, EngineConfig::default()).unwrap()
}

fn headphone() -> Product {
    Product::new("Wireless Headphone X200")
}

#[tokio::test]
async fn end_to_end_headphone_scenario() {
    let oracle = FixedOracle::new("sound, battery, comfortable, bluetooth", "");
    let engine = engine_with(oracle);

    let review =
        Review::new("Great sound quality and battery life, very comfortable for long calls");
    assert!(engine.is_genuine_review(&review, &headphone()).await);
}

#[tokio::test]
async fn pattern_veto_is_absolute() {
    // Oracle keywords cover the comments entirely; the pattern filter must
    // still reject before the oracle is ever consulted
    let oracle = FixedOracle::new("sound, battery, stars, son", "");
    let engine = engine_with(oracle.clone());

    let starry = Review::new("★★★★★ amazing sound and battery");
    assert!(!engine.is_genuine_review(&starry, &headphone()).await);

    let gifted = Review::new("bought this for my son, sound and battery are fine");
    assert!(!engine.is_genuine_review(&gifted, &headphone()).await);

    assert_eq!(oracle.call_count(), 0, "pattern rejects must skip the oracle");
}

#[tokio::test]
async fn short_comment_rejected_without_oracle() {
    let oracle = FixedOracle::new("sound", "");
    let engine = engine_with(oracle.clone());

    assert!(!engine.is_genuine_review(&Review::new("ok"), &headphone()).await);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn category_fallback_reachable_when_oracle_rejects() {
    // No oracle keyword appears in the comment, but a product-name word does
    let oracle = FixedOracle::new("latency, codec, impedance", "");
    let engine = engine_with(oracle);

    let review = Review::new("the x200 showed up early and works as described");
    assert!(engine.is_genuine_review(&review, &headphone()).await);
}

#[tokio::test]
async fn oracle_outage_degrades_instead_of_failing() {
    let engine = engine_with(Arc::new(DownOracle));

    // Degraded profile cannot satisfy the keyword threshold, but a comment
    // mentioning a category keyword still passes via the fallback
    let review = Review::new("decent bass and the pairing took seconds");
    assert!(engine.is_genuine_review(&review, &headphone()).await);

    // Unrelated text stays rejected, still without any error surfacing
    let unrelated = Review::new("shipped in a plain box with lots of tape");
    assert!(!engine.is_genuine_review(&unrelated, &headphone()).await);
}

#[tokio::test]
async fn profile_is_fetched_once_per_product() {
    let oracle = FixedOracle::new("sound, battery, comfortable", "");
    let engine = engine_with(oracle.clone());

    let review = Review::new("solid sound and the battery holds up fine");
    engine.is_genuine_review(&review, &headphone()).await;
    engine.is_genuine_review(&review, &headphone()).await;

    // One keyword call and one contrast call, then cached
    assert_eq!(oracle.call_count(), 2);
}

fn batch(genuine: usize, fake: usize) -> Vec<Review> {
    let mut reviews = Vec::new();
    for i in 0..genuine {
        reviews.push(
            Review::new(format!(
                "take {}: the sound is clear and the battery holds up fine",
                i
            ))
            .with_reviewer(format!("reviewer-{}", i)),
        );
    }
    for i in 0..fake {
        reviews.push(
            Review::new(format!("★★★★★ number {} would recommend to anyone", i))
                .with_reviewer(format!("shill-{}", i)),
        );
    }
    reviews
}

#[tokio::test]
async fn batch_at_exact_ratio_fails() {
    let oracle = FixedOracle::new("sound, battery, clear", "");
    let engine = engine_with(oracle);

    // 7 of 10 genuine: 0.7 is not strictly greater than 0.7
    assert!(
        !engine
            .analyze_review_batch(&batch(7, 3), &headphone())
            .await
    );
}

#[tokio::test]
async fn batch_above_ratio_passes() {
    let oracle = FixedOracle::new("sound, battery, clear", "");
    let engine = engine_with(oracle);

    assert!(
        engine
            .analyze_review_batch(&batch(8, 2), &headphone())
            .await
    );
}

#[tokio::test]
async fn batch_duplicate_text_veto() {
    let oracle = FixedOracle::new("sound, battery, clear", "");
    let engine = engine_with(oracle.clone());

    let reviews = vec![
        Review::new("the sound is clear and the battery holds up fine").with_reviewer("a"),
        Review::new("  THE SOUND IS CLEAR AND THE BATTERY HOLDS UP FINE ").with_reviewer("b"),
        Review::new("clear sound, battery could be better").with_reviewer("c"),
    ];

    assert!(!engine.analyze_review_batch(&reviews, &headphone()).await);
    assert_eq!(oracle.call_count(), 0, "pre-checks must run before any oracle call");
}

#[tokio::test]
async fn batch_missing_reviewer_veto() {
    let oracle = FixedOracle::new("sound, battery, clear", "");
    let engine = engine_with(oracle.clone());

    let reviews = vec![
        Review::new("the sound is clear and the battery holds up fine").with_reviewer("a"),
        Review::new("clear sound, battery could be better"),
    ];

    assert!(!engine.analyze_review_batch(&reviews, &headphone()).await);
    assert_eq!(oracle.call_count(), 0);
}

#[tokio::test]
async fn empty_batch_fails_closed() {
    let oracle = FixedOracle::new("sound", "");
    let engine = engine_with(oracle);
    assert!(!engine.analyze_review_batch(&[], &headphone()).await);
}

#[tokio::test]
async fn invalidation_allows_recomputation() {
    let oracle = FixedOracle::new("sound, battery, clear", "");
    let engine = engine_with(oracle.clone());

    let review = Review::new("the sound is clear and the battery holds up fine");
    engine.is_genuine_review(&review, &headphone()).await;
    assert_eq!(oracle.call_count(), 2);

    engine.profile_cache().invalidate("Wireless Headphone X200");
    engine.is_genuine_review(&review, &headphone()).await;
    assert_eq!(oracle.call_count(), 4);
}
