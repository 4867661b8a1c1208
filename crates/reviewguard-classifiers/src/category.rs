//! Product category inference and the static category keyword table
//!
//! `infer_category` walks a fixed, ordered rule list; product names often
//! contain several candidate substrings ("wireless headphone with mic"), so
//! rule precedence is part of the contract, not incidental.

use reviewguard_core::Result;
use std::collections::HashMap;
use std::path::Path;

/// Ordered (substring, tag) rules; first match wins
///
/// More specific substrings come first: "headphone"/"earphone" before
/// "phone", "firetv"/"smart tv" before "tv".
const CATEGORY_RULES: &[(&str, &str)] = &[
    ("headphone", "headphone"),
    ("earphone", "headphone"),
    ("earbud", "headphone"),
    ("headset", "headphone"),
    ("laptop", "laptop"),
    ("notebook", "laptop"),
    ("macbook", "laptop"),
    ("firetv", "smartfiretv"),
    ("fire tv", "smartfiretv"),
    ("smart tv", "smartfiretv"),
    ("tv", "smartfiretv"),
    ("smartphone", "mobile"),
    ("phone", "mobile"),
    ("mobile", "mobile"),
    ("tablet", "tablet"),
    ("smartwatch", "watch"),
    ("watch", "watch"),
    ("camera", "camera"),
    ("speaker", "speaker"),
    ("soundbar", "speaker"),
    ("refrigerator", "appliance"),
    ("fridge", "appliance"),
    ("washing machine", "appliance"),
    ("microwave", "appliance"),
    ("shoe", "footwear"),
    ("sneaker", "footwear"),
    ("boot", "footwear"),
];

/// Tag returned when no rule matches
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Infer a category tag from a product name, case-insensitive
pub fn infer_category(product_name: &str) -> &'static str {
    let name = product_name.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(needle, _)| name.contains(needle))
        .map(|(_, tag)| *tag)
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// Static category-tag → keyword dictionary
///
/// Loaded once at startup and read-only thereafter; used only as the
/// fallback signal when the oracle verifier rejects.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    entries: HashMap<String, Vec<String>>,
}

impl CategoryTable {
    /// Table embedded at build time
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(include_str!("../data/categories.json"))
    }

    /// Parse a JSON object mapping lowercase tags to keyword arrays
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: HashMap<String, Vec<String>> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// Load a dictionary file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Keywords for a tag; empty when the tag has no entry
    pub fn keywords(&self, tag: &str) -> &[String] {
        self.entries.get(tag).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of category entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_basic_categories() {
        assert_eq!(infer_category("Wireless Headphone X200"), "headphone");
        assert_eq!(infer_category("UltraBook Laptop 14"), "laptop");
        assert_eq!(infer_category("55 inch Smart TV"), "smartfiretv");
        assert_eq!(infer_category("Mystery Gadget"), UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_precedence_headphone_before_phone() {
        // "headphone" contains "phone"; the more specific rule must win
        assert_eq!(infer_category("Noise Cancelling Headphone"), "headphone");
        assert_eq!(infer_category("Budget Phone 5G"), "mobile");
    }

    #[test]
    fn test_precedence_firetv_before_tv() {
        assert_eq!(infer_category("FireTV Stick 4K"), "smartfiretv");
        assert_eq!(infer_category("Basic TV Mount"), "smartfiretv");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(infer_category("LAPTOP pro"), "laptop");
    }

    #[test]
    fn test_builtin_table() {
        let table = CategoryTable::builtin().unwrap();
        assert!(!table.is_empty());
        assert!(table
            .keywords("headphone")
            .iter()
            .any(|k| k == "sound"));
        assert!(table.keywords("no-such-tag").is_empty());
    }

    #[test]
    fn test_from_json_str() {
        let table =
            CategoryTable::from_json_str(r#"{"widget": ["spin", "whirr"]}"#).unwrap();
        assert_eq!(table.keywords("widget"), ["spin", "whirr"]);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(CategoryTable::from_json_str("not json").is_err());
    }
}
