//! Result filtering
//!
//! Upstream image search returns plenty of near-miss items: handbags shot
//! next to the outfit, jewelry on the model, phone cases printed with the
//! garment. This module rejects those by keyword before results reach the
//! caller, and maps the survivors into the response shape the frontend
//! consumes.
//!
//! The filter is a pure function over the raw item list so every route that
//! serves search results shares one implementation.

use serde::{Deserialize, Serialize};

use crate::search::google_cse::RawResultItem;

/// Lowercase substrings that disqualify a result. An item whose combined
/// title + snippet + context link contains any of these is dropped.
pub const EXCLUDE_KEYWORDS: &[&str] = &[
    // Accessories
    "bag", "purse", "handbag", "wallet", "clutch", "tote", "satchel", "backpack", "pouch",
    "accessory",
    // Jewelry & watches
    "jewelry", "watch", "necklace", "bracelet", "ring", "earring", "chain",
    // Footwear
    "shoe", "boot", "sneaker", "sandal", "heel", "loafer", "slipper",
    // Other accessories
    "belt", "hat", "cap", "sunglasses", "scarf", "glove", "tie",
    // Non-clothing items
    "phone", "case", "cover", "toy", "doll", "food", "drink", "furniture", "electronics",
    "home", "kitchen", "car", "auto", "book", "magazine", "poster", "art", "painting",
];

/// Strong garment keywords. Only consulted when the positive override is
/// enabled: an item matching one of these survives an exclusion hit.
pub const CLOTHING_KEYWORDS: &[&str] = &[
    "shirt", "dress", "jacket", "coat", "pants", "jeans", "skirt", "blouse", "sweater",
    "hoodie", "top", "bottom", "clothing", "apparel", "fashion",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterOptions {
    /// Keep items that contain an exclusion keyword when they also contain a
    /// strong clothing keyword. Off by default: pure exclusion.
    pub allow_positive_override: bool,
}

/// Normalized result returned to the caller, independent of the upstream
/// provider's raw schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    /// Image URL.
    pub link: String,
    #[serde(rename = "displayLink")]
    pub display_link: String,
    pub snippet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Source page the image came from.
    pub context: String,
}

/// Apply the exclusion filter and map survivors to the response shape.
pub fn filter_and_map(items: Vec<RawResultItem>, options: FilterOptions) -> Vec<ResultItem> {
    items
        .into_iter()
        .filter(|item| keep_item(item, options))
        .map(into_result_item)
        .collect()
}

fn keep_item(item: &RawResultItem, options: FilterOptions) -> bool {
    let blob = combined_text(item);

    let has_excluded = EXCLUDE_KEYWORDS.iter().any(|k| blob.contains(k));
    if !has_excluded {
        return true;
    }

    options.allow_positive_override && CLOTHING_KEYWORDS.iter().any(|k| blob.contains(k))
}

/// Lowercase text blob the keyword checks run against.
fn combined_text(item: &RawResultItem) -> String {
    let context = item
        .image
        .as_ref()
        .and_then(|i| i.context_link.as_deref())
        .unwrap_or("");

    format!(
        "{} {} {}",
        item.title.to_lowercase(),
        item.snippet.as_deref().unwrap_or("").to_lowercase(),
        context.to_lowercase()
    )
}

fn into_result_item(item: RawResultItem) -> ResultItem {
    let context = item
        .image
        .as_ref()
        .and_then(|i| i.context_link.clone())
        .unwrap_or_else(|| item.link.clone());

    let thumbnail = item.image.as_ref().and_then(|i| i.thumbnail_link.clone());

    let snippet = match item.snippet {
        Some(s) if !s.is_empty() => s,
        _ => item.title.clone(),
    };

    ResultItem {
        title: item.title,
        link: item.link,
        display_link: item.display_link.unwrap_or_default(),
        snippet,
        thumbnail,
        context,
    }
}
