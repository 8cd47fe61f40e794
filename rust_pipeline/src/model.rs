//! Data model shared by every stage of the pipeline.
//!
//! All entities are built once from input and stay read-only until the final
//! ranking is produced. A `Vec<ScoredEntry>` is the contract between stages.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{RecError, Result};

/// Weighted attribute. Names are expected, not required, to be unique within a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub value: f64,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Tag {
            name: name.into(),
            value,
        }
    }
}

/// Catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub tags: Vec<Tag>,
    /// Popularity signal, >= 0.
    pub view_count: f64,
    /// Engagement signal (e.g. average seconds spent), >= 0.
    pub interaction_time: f64,
}

impl Item {
    pub fn new(id: impl Into<String>, tags: Vec<Tag>, view_count: f64, interaction_time: f64) -> Self {
        Item {
            id: id.into(),
            tags,
            view_count,
            interaction_time,
        }
    }
}

/// Ordered set of items with unique ids.
///
/// Serializes as a plain list of items; deserializing goes through
/// [`Catalog::new`] so duplicate ids are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Item>", into = "Vec<Item>")]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate item ids.
    pub fn new(items: Vec<Item>) -> Result<Self> {
        let mut seen = AHashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(RecError::DuplicateItemId(item.id.clone()));
            }
        }
        Ok(Catalog { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Largest view count and interaction time across the catalog, (0, 0) when empty.
    pub fn metric_maxima(&self) -> (f64, f64) {
        self.items.iter().fold((0.0, 0.0), |(views, time), item| {
            (views.max(item.view_count), time.max(item.interaction_time))
        })
    }
}

impl TryFrom<Vec<Item>> for Catalog {
    type Error = RecError;

    fn try_from(items: Vec<Item>) -> Result<Self> {
        Catalog::new(items)
    }
}

impl From<Catalog> for Vec<Item> {
    fn from(catalog: Catalog) -> Self {
        catalog.items
    }
}

/// Taste vector of the querying user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub tags: Vec<Tag>,
}

impl UserProfile {
    pub fn new(tags: Vec<Tag>) -> Self {
        UserProfile { tags }
    }
}

/// Similar user for collaborative filtering.
///
/// `similarity` is used as a linear weight and is not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peer {
    pub id: String,
    pub similarity: f64,
    pub liked_items: Vec<String>,
}

impl Peer {
    pub fn new(id: impl Into<String>, similarity: f64, liked_items: Vec<String>) -> Self {
        Peer {
            id: id.into(),
            similarity,
            liked_items,
        }
    }
}

/// How much popularity/engagement contributes next to tag similarity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub use_metrics: bool,
    pub weight_views: f64,
    pub weight_time: f64,
    pub weight_tags: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            use_metrics: false,
            weight_views: 0.0,
            weight_time: 0.0,
            weight_tags: 1.0,
        }
    }
}

/// Output unit of every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntry {
    #[serde(rename = "id")]
    pub item_id: String,
    pub score: f64,
}

impl ScoredEntry {
    pub fn new(item_id: impl Into<String>, score: f64) -> Self {
        ScoredEntry {
            item_id: item_id.into(),
            score,
        }
    }
}

/// Sort descending by score. Stable, so equal scores keep their input order.
pub fn sort_by_score_desc(entries: &mut [ScoredEntry]) {
    entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let items = vec![
            Item::new("a", vec![], 1.0, 1.0),
            Item::new("b", vec![], 1.0, 1.0),
            Item::new("a", vec![], 2.0, 2.0),
        ];
        match Catalog::new(items) {
            Err(RecError::DuplicateItemId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_deserialize_validates_ids() {
        let json = r#"[
            {"id": "a", "tags": [{"name": "scifi", "value": 1.0}], "view_count": 3.0, "interaction_time": 1.0},
            {"id": "b", "tags": [], "view_count": 0.0, "interaction_time": 0.0}
        ]"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items()[0].tags, vec![Tag::new("scifi", 1.0)]);

        let encoded = serde_json::to_value(&catalog).unwrap();
        assert_eq!(encoded.as_array().unwrap().len(), 2);
        assert_eq!(encoded[1]["id"], "b");

        let duplicate = r#"[
            {"id": "a", "tags": [], "view_count": 0.0, "interaction_time": 0.0},
            {"id": "a", "tags": [], "view_count": 1.0, "interaction_time": 1.0}
        ]"#;
        let err = serde_json::from_str::<Catalog>(duplicate).unwrap_err();
        assert!(err.to_string().contains("duplicate item id"));
    }

    #[test]
    fn test_metric_maxima() {
        let catalog = Catalog::new(vec![
            Item::new("a", vec![], 100.0, 5.0),
            Item::new("b", vec![], 10.0, 50.0),
        ])
        .unwrap();
        assert_eq!(catalog.metric_maxima(), (100.0, 50.0));
        assert_eq!(Catalog::default().metric_maxima(), (0.0, 0.0));
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut entries = vec![
            ScoredEntry::new("x", 1.0),
            ScoredEntry::new("y", 2.0),
            ScoredEntry::new("z", 1.0),
        ];
        sort_by_score_desc(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.item_id.as_str()).collect();
        assert_eq!(ids, vec!["y", "x", "z"]);
    }

    #[test]
    fn test_scored_entry_serializes_as_id_and_score() {
        let json = serde_json::to_string(&ScoredEntry::new("A", 1.5)).unwrap();
        assert_eq!(json, r#"{"id":"A","score":1.5}"#);
    }
}
