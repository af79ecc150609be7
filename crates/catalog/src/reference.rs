//! Fixed "all possible values" lists surfaced next to query results as UI hints.
//!
//! These are configuration, not aggregates: they never depend on what is in stock.

use std::sync::Arc;

pub const ALL_SIZES: [&str; 5] = ["S", "M", "L", "XL", "XXL"];

pub const ALL_COLORS: [&str; 9] = [
    "WHITE",
    "BLACK",
    "INDIGO",
    "SKY BLUE",
    "NAVY BLUE",
    "GREEN",
    "GREY",
    "MAROON",
    "RED",
];

/// Placeholder image for a group with no live documents.
pub const DEFAULT_GROUP_IMAGE_URL: &str = "default-image-url";

/// Process-wide reference lists, shared read-only by every response path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub default_group_image_url: String,
}

impl ReferenceData {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            sizes: ALL_SIZES.iter().map(|s| s.to_string()).collect(),
            colors: ALL_COLORS.iter().map(|c| c.to_string()).collect(),
            default_group_image_url: DEFAULT_GROUP_IMAGE_URL.to_string(),
        }
    }
}
