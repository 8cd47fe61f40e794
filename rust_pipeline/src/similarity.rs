//! Tag-vector cosine similarity.

use crate::model::{Item, Tag, UserProfile};

/// Cosine similarity between a user's taste vector and an item's tags.
///
/// Each tag set is a sparse vector over tag names. An item tag is matched
/// against the *first* user tag with the same name; later duplicates on the
/// user side only count towards the user norm. Norms are taken over the
/// full tag sets, so unmatched tags still dilute the score.
///
/// Returns exactly 0.0 when either side has zero magnitude. No clamping is
/// applied, so negative tag values can yield results below 0.
///
/// Example:
///     user {"scifi": 1.0}, item {"scifi": 1.0}  → 1.0
///     user {"scifi": 1.0}, item {"fantasy": 1.0} → 0.0
pub fn cosine_similarity(user: &UserProfile, item: &Item) -> f64 {
    let norm_user = euclidean_norm(&user.tags);
    let norm_item = euclidean_norm(&item.tags);
    if norm_user == 0.0 || norm_item == 0.0 {
        return 0.0;
    }

    let dot: f64 = item
        .tags
        .iter()
        .filter_map(|tag| {
            user.tags
                .iter()
                .find(|utag| utag.name == tag.name)
                .map(|utag| utag.value * tag.value)
        })
        .sum();

    dot / (norm_user * norm_item)
}

#[inline]
fn euclidean_norm(tags: &[Tag]) -> f64 {
    tags.iter().map(|t| t.value * t.value).sum::<f64>().sqrt()
}
