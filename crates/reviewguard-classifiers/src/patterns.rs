//! Fake-review pattern filter
//!
//! Deterministic first stage of the genuineness pipeline. Runs before any
//! oracle call and rejects obviously synthetic review text outright.
//!
//! Rules are a declarative list of (tag, matcher) pairs so each one can be
//! unit-tested and extended in isolation. Detection covers:
//! - Excessive punctuation and ALL-CAPS runs
//! - Extreme-sentiment word pairs
//! - Gift-script and incentive-disclosure phrasing
//! - Brand comparisons and literal star-rating mentions
//! - Hyperbolic claims, repeated praise adjectives, intensifier runs

use aho_corasick::AhoCorasick;
use regex::Regex;
use reviewguard_core::{Error, Result};

/// A single named rejection rule
pub struct PatternRule {
    tag: &'static str,
    matcher: RuleMatcher,
}

impl PatternRule {
    /// Rule tag, stable across releases (used in logs and tests)
    pub fn tag(&self) -> &'static str {
        self.tag
    }
}

/// How a rule decides whether text is suspicious
enum RuleMatcher {
    /// Any phrase present as a substring of the lowercased text
    Phrases(AhoCorasick),

    /// Regex over the lowercased text
    Lower(Regex),

    /// Regex over the trimmed original text (for case-sensitive signals)
    Raw(Regex),

    /// One term from each side present (co-occurrence)
    Pair { left: AhoCorasick, right: AhoCorasick },

    /// The same word from the set appears at least `min` times
    RepeatedWord {
        words: &'static [&'static str],
        min: usize,
    },
}

/// Deterministic reject-stage run before any external call
pub struct PatternFilter {
    min_comment_len: usize,
    rules: Vec<PatternRule>,
}

impl PatternFilter {
    /// Create a filter with the default rule library
    pub fn new(min_comment_len: usize) -> Result<Self> {
        let rules = vec![
            PatternRule {
                tag: "excessive_punctuation",
                matcher: RuleMatcher::Phrases(build_matcher(&["!!", "??"])?),
            },
            PatternRule {
                tag: "caps_run",
                matcher: RuleMatcher::Raw(build_regex(r"[A-Z]{4,}")?),
            },
            PatternRule {
                tag: "extreme_sentiment_pair",
                matcher: RuleMatcher::Pair {
                    left: build_matcher(&["love", "hate", "worst"])?,
                    right: build_matcher(&["perfect", "awful", "scam", "terrible"])?,
                },
            },
            PatternRule {
                tag: "gift_script",
                matcher: RuleMatcher::Phrases(build_matcher(&[
                    "bought this for",
                    "my son",
                    "my daughter",
                    "my husband",
                    "my wife",
                ])?),
            },
            PatternRule {
                tag: "brand_comparison",
                matcher: RuleMatcher::Phrases(build_matcher(&[
                    "compared to",
                    "better than",
                ])?),
            },
            PatternRule {
                tag: "star_rating_mention",
                matcher: RuleMatcher::Lower(build_regex(r"★|\b[1-5]\s*stars?\b")?),
            },
            PatternRule {
                tag: "incentive_disclosure",
                matcher: RuleMatcher::Lower(build_regex(
                    r"received\s+(\w+\s+){0,2}(as\s+a\s+gift|at\s+a\s+discount|for\s+free|for\s+(an?\s+)?(honest\s+)?review)",
                )?),
            },
            PatternRule {
                tag: "hyperbolic_claim",
                matcher: RuleMatcher::Phrases(build_matcher(&[
                    "changed my life",
                    "life changing",
                    "life-changing",
                    "must buy",
                ])?),
            },
            PatternRule {
                tag: "repeated_praise",
                matcher: RuleMatcher::RepeatedWord {
                    words: GLOWING_ADJECTIVES,
                    min: 2,
                },
            },
            PatternRule {
                tag: "intensifier_run",
                matcher: RuleMatcher::Phrases(build_matcher(&[
                    "very very",
                    "really really",
                    "extremely extremely",
                    "so so so",
                ])?),
            },
            PatternRule {
                tag: "missing_feature_cheap",
                matcher: RuleMatcher::Pair {
                    left: build_matcher(&[
                        "missing",
                        "lacks",
                        "lacking",
                        "doesn't have",
                        "does not have",
                    ])?,
                    right: build_matcher(&["cheap"])?,
                },
            },
        ];

        Ok(Self {
            min_comment_len,
            rules,
        })
    }

    /// Tag of the first rule the text trips, if any
    ///
    /// Length is not a rule; see [`PatternFilter::is_obviously_fake`] for the
    /// full gate.
    pub fn first_match(&self, text: &str) -> Option<&'static str> {
        let raw = text.trim();
        let lower = raw.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule_matches(&rule.matcher, raw, &lower))
            .map(|rule| rule.tag)
    }

    /// True when the text should be rejected without consulting the oracle
    ///
    /// A text that passes this gate is not automatically genuine; it proceeds
    /// to the oracle verifier.
    pub fn is_obviously_fake(&self, text: &str) -> bool {
        let raw = text.trim();
        if raw.chars().count() < self.min_comment_len {
            return true;
        }
        self.first_match(raw).is_some()
    }

    /// Number of rules in the library
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}

/// Praise adjectives counted for the repeated-praise rule
const GLOWING_ADJECTIVES: &[&str] = &[
    "amazing",
    "awesome",
    "great",
    "excellent",
    "fantastic",
    "perfect",
    "wonderful",
    "incredible",
    "best",
    "outstanding",
];

fn rule_matches(matcher: &RuleMatcher, raw: &str, lower: &str) -> bool {
    match matcher {
        RuleMatcher::Phrases(ac) => ac.is_match(lower),
        RuleMatcher::Lower(re) => re.is_match(lower),
        RuleMatcher::Raw(re) => re.is_match(raw),
        RuleMatcher::Pair { left, right } => left.is_match(lower) && right.is_match(lower),
        RuleMatcher::RepeatedWord { words, min } => {
            words.iter().any(|word| {
                lower
                    .split(|c: char| !c.is_alphanumeric())
                    .filter(|token| token == word)
                    .count()
                    >= *min
            })
        }
    }
}

fn build_matcher(phrases: &[&str]) -> Result<AhoCorasick> {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(phrases)
        .map_err(|e| Error::classifier(format!("failed to build pattern matcher: {}", e)))
}

fn build_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| Error::classifier(format!("failed to compile pattern rule: {}", e)))
}
