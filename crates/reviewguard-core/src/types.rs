//! Core types for ReviewGuard

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A submitted product review, immutable for the duration of classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// Free-text review body
    pub comment: String,

    /// Star rating (1..=5), optional for classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,

    /// Reviewer identity, required for batch uniqueness checks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer: Option<String>,

    /// Opaque product id the review targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

impl Review {
    /// Create a new review with just a comment
    pub fn new(comment: impl Into<String>) -> Self {
        Self {
            comment: comment.into(),
            rating: None,
            reviewer: None,
            product_id: None,
        }
    }

    /// Attach a star rating
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach a reviewer identity
    pub fn with_reviewer(mut self, reviewer: impl Into<String>) -> Self {
        self.reviewer = Some(reviewer.into());
        self
    }

    /// Attach a product id
    pub fn with_product_id(mut self, product_id: impl Into<String>) -> Self {
        self.product_id = Some(product_id.into());
        self
    }

    /// Comment normalized for comparison: trimmed and lowercased
    pub fn normalized_comment(&self) -> String {
        self.comment.trim().to_lowercase()
    }
}

/// Read-only product reference data used during classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product display name
    pub name: String,

    /// Brand, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Category tag, if known; inferred from the name otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    /// Create a new product with just a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brand: None,
            category: None,
        }
    }

    /// Attach a brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Attach a category tag
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Cached keyword/contrast pair for one product name
///
/// Created lazily on the first classification request for a product and
/// never mutated afterwards, only replaced wholesale on recomputation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordProfile {
    /// Lowercase terms that genuinely describe the product
    pub keywords: HashSet<String>,

    /// Lowercase terms that should never describe the product
    pub contrasts: HashSet<String>,
}

impl KeywordProfile {
    /// Create a profile from keyword and contrast lists
    pub fn new(
        keywords: impl IntoIterator<Item = String>,
        contrasts: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            keywords: keywords.into_iter().collect(),
            contrasts: contrasts.into_iter().collect(),
        }
    }

    /// Minimal profile used when the oracle is unavailable: the lowercased
    /// product name as the only keyword, no contrasts
    pub fn degraded(product_name: &str) -> Self {
        let mut keywords = HashSet::new();
        keywords.insert(product_name.to_lowercase());
        Self {
            keywords,
            contrasts: HashSet::new(),
        }
    }

    /// Whether this is the degraded single-keyword fallback
    pub fn is_degraded(&self) -> bool {
        self.keywords.len() <= 1 && self.contrasts.is_empty()
    }
}

/// Upstream purchase-history gate, consumed by review-submission controllers
/// before classification is ever invoked. Only the boundary lives here.
#[async_trait]
pub trait PurchaseVerifier: Send + Sync {
    /// Has this reviewer a delivered order containing this product?
    async fn has_delivered_order(
        &self,
        reviewer: &str,
        product_id: &str,
    ) -> crate::Result<bool>;
}
