//! Lexicon-based sentiment scorer
//!
//! Stateless signed-intensity estimator over stemmed tokens. The engine uses
//! only the magnitude of the score as a polarization threshold; the value is
//! never surfaced to callers.

use regex::Regex;
use reviewguard_core::{Error, Result};
use std::collections::HashMap;

/// Polarity lexicon sentiment scorer
pub struct SentimentScorer {
    lexicon: HashMap<&'static str, i32>,
    word: Regex,
}

impl SentimentScorer {
    pub fn new() -> Result<Self> {
        let lexicon = LEXICON.iter().copied().collect();
        let word = Regex::new(r"[a-z']+")
            .map_err(|e| Error::classifier(format!("failed to compile tokenizer: {}", e)))?;
        Ok(Self { lexicon, word })
    }

    /// Signed sentiment sum over the text, unbounded
    pub fn score(&self, text: &str) -> f32 {
        let lower = text.to_lowercase();
        let mut total = 0i32;

        for token in self.word.find_iter(&lower) {
            let token = token.as_str();
            if let Some(valence) = self.valence(token) {
                total += valence;
            }
        }

        total as f32
    }

    /// Valence for a token, falling back to its stem
    fn valence(&self, token: &str) -> Option<i32> {
        if let Some(v) = self.lexicon.get(token) {
            return Some(*v);
        }
        self.lexicon.get(stem(token).as_ref()).copied()
    }
}

/// Light suffix stemmer, enough to fold common inflections into the lexicon
fn stem(token: &str) -> std::borrow::Cow<'_, str> {
    for suffix in ["ingly", "edly", "ing", "ed", "ly", "es", "s"] {
        if let Some(base) = token.strip_suffix(suffix) {
            if base.len() >= 3 {
                return std::borrow::Cow::Owned(base.to_string());
            }
        }
    }
    std::borrow::Cow::Borrowed(token)
}

/// AFINN-style polarity entries, -5 (most negative) to +5 (most positive)
const LEXICON: &[(&str, i32)] = &[
    ("amazing", 4),
    ("awesome", 4),
    ("awful", -3),
    ("bad", -3),
    ("best", 3),
    ("breathtaking", 5),
    ("broken", -1),
    ("cheap", -1),
    ("comfortable", 2),
    ("crap", -3),
    ("damaged", -3),
    ("defective", -3),
    ("delight", 3),
    ("disappoint", -2),
    ("disappointing", -2),
    ("dreadful", -3),
    ("easy", 1),
    ("enjoy", 2),
    ("excellent", 3),
    ("exceptional", 3),
    ("fake", -3),
    ("fantastic", 4),
    ("fast", 1),
    ("faulty", -2),
    ("favorite", 2),
    ("flawless", 4),
    ("flimsy", -2),
    ("fraud", -4),
    ("garbage", -3),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("hate", -3),
    ("horrible", -3),
    ("impress", 3),
    ("incredible", 4),
    ("junk", -3),
    ("love", 3),
    ("loved", 3),
    ("magnificent", 4),
    ("mediocre", -1),
    ("nice", 3),
    ("outstanding", 5),
    ("overpriced", -2),
    ("perfect", 3),
    ("phenomenal", 4),
    ("pleasant", 3),
    ("poor", -2),
    ("quality", 1),
    ("recommend", 2),
    ("refund", -2),
    ("regret", -2),
    ("reliable", 2),
    ("return", -1),
    ("rubbish", -3),
    ("sad", -2),
    ("satisfied", 2),
    ("scam", -4),
    ("slow", -1),
    ("solid", 2),
    ("stunning", 4),
    ("sturdy", 2),
    ("superb", 5),
    ("terrible", -3),
    ("trash", -3),
    ("unreliable", -2),
    ("unusable", -3),
    ("useless", -2),
    ("waste", -2),
    ("wonderful", 4),
    ("worst", -3),
    ("worthless", -2),
    ("wow", 4),
];
