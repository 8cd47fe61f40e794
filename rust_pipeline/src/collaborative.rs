//! Peer-based collaborative scoring.
//!
//! Score(item) = Σ similarity(peer) over every peer that liked the item.
//! An item liked by no peer is simply absent from the output.

use ahash::{AHashMap, AHashSet};
use tracing::debug;

use crate::model::{sort_by_score_desc, Peer, ScoredEntry};

/// Aggregate peer similarities into per-item scores, ranked descending.
///
/// A peer listing the same item twice contributes once. Ties keep the order
/// in which items were first seen (peer order, then liked order).
pub fn recommend_collaborative(peers: &[Peer]) -> Vec<ScoredEntry> {
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut recs: Vec<ScoredEntry> = Vec::new();

    for peer in peers {
        let mut counted: AHashSet<&str> = AHashSet::with_capacity(peer.liked_items.len());
        for item_id in &peer.liked_items {
            if !counted.insert(item_id.as_str()) {
                continue;
            }
            let slot = *index.entry(item_id.as_str()).or_insert_with(|| {
                recs.push(ScoredEntry::new(item_id.clone(), 0.0));
                recs.len() - 1
            });
            recs[slot].score += peer.similarity;
        }
    }

    sort_by_score_desc(&mut recs);
    debug!(peers = peers.len(), items = recs.len(), "collaborative scoring complete");
    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn liked(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_peer_similarities_accumulate() {
        let peers = vec![
            Peer::new("u1", 0.8, liked(&["X", "Y"])),
            Peer::new("u2", 0.3, liked(&["Y"])),
        ];

        let recs = recommend_collaborative(&peers);

        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].item_id, "Y");
        assert!((recs[0].score - 1.1).abs() < 1e-9);
        assert_eq!(recs[1].item_id, "X");
        assert!((recs[1].score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_no_peers_no_entries() {
        assert!(recommend_collaborative(&[]).is_empty());
        assert!(recommend_collaborative(&[Peer::new("u", 1.0, vec![])]).is_empty());
    }

    #[test]
    fn test_duplicate_like_within_peer_counts_once() {
        let recs = recommend_collaborative(&[Peer::new("u", 0.5, liked(&["X", "X"]))]);
        assert_eq!(recs, vec![ScoredEntry::new("X", 0.5)]);
    }

    #[test]
    fn test_negative_similarity_is_a_linear_weight() {
        let peers = vec![
            Peer::new("u1", 0.4, liked(&["X", "Y"])),
            Peer::new("u2", -0.6, liked(&["X"])),
        ];
        let recs = recommend_collaborative(&peers);
        assert_eq!(recs[0].item_id, "Y");
        assert_eq!(recs[1].item_id, "X");
        assert!((recs[1].score + 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let peers = vec![
            Peer::new("u1", 1.0, liked(&["C", "A"])),
            Peer::new("u2", 1.0, liked(&["B"])),
        ];
        let ids: Vec<String> = recommend_collaborative(&peers)
            .into_iter()
            .map(|e| e.item_id)
            .collect();
        assert_eq!(ids, vec!["C", "A", "B"]);
    }
}
