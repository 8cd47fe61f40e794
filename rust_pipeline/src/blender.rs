//! Weighted merge of the content and collaborative rankings.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{sort_by_score_desc, ScoredEntry};

/// Relative importance of each signal source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendWeights {
    pub content: f64,
    pub collaborative: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        BlendWeights {
            content: 0.5,
            collaborative: 0.5,
        }
    }
}

/// Merge two rankings by item id.
///
/// combined[id] = content_weight × content[id] + collab_weight × collab[id],
/// where a side that does not rank the item contributes 0. Items known to
/// either scorer can therefore surface; items known to neither never do.
///
/// Ties keep first-seen order, content list first.
pub fn combine_recommendations(
    content: &[ScoredEntry],
    collaborative: &[ScoredEntry],
    weights: BlendWeights,
) -> Vec<ScoredEntry> {
    let mut index: AHashMap<&str, usize> = AHashMap::with_capacity(content.len() + collaborative.len());
    let mut combined: Vec<ScoredEntry> = Vec::with_capacity(content.len() + collaborative.len());

    let sources = [(content, weights.content), (collaborative, weights.collaborative)];
    for (entries, weight) in sources {
        for entry in entries {
            let slot = *index.entry(entry.item_id.as_str()).or_insert_with(|| {
                combined.push(ScoredEntry::new(entry.item_id.clone(), 0.0));
                combined.len() - 1
            });
            combined[slot].score += weight * entry.score;
        }
    }

    sort_by_score_desc(&mut combined);
    debug!(
        content = content.len(),
        collaborative = collaborative.len(),
        combined = combined.len(),
        "blend complete"
    );
    combined
}
