//! ReviewGuard Core
//!
//! Core types, traits, and error handling shared across ReviewGuard
//! components.
//!
//! This crate provides:
//! - Review, product, and keyword-profile types
//! - Error types and result handling
//! - The purchase-history boundary trait consumed upstream of the engine

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{KeywordProfile, Product, PurchaseVerifier, Review};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{KeywordProfile, Product, PurchaseVerifier, Review};
}
