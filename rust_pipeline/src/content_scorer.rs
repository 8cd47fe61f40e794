//! Content-based scoring over the full catalog.
//!
//! Score = weight_tags × cosine(user, item)
//!       + weight_views × views / max_views      (only with use_metrics)
//!       + weight_time  × time / max_time        (only with use_metrics)
//!
//! Maxima are taken over the whole catalog; a zero maximum turns its term
//! into 0 so items are never penalized when the catalog carries no signal.

use rayon::prelude::*;
use tracing::debug;

use crate::model::{sort_by_score_desc, Catalog, Item, MetricsConfig, ScoredEntry, UserProfile};
use crate::similarity::cosine_similarity;

/// Content score of a single item given precomputed catalog maxima.
///
/// With `config.use_metrics == false` this is exactly
/// `config.weight_tags * cosine_similarity(user, item)`.
pub fn compute_item_score(
    user: &UserProfile,
    item: &Item,
    config: &MetricsConfig,
    max_views: f64,
    max_time: f64,
) -> f64 {
    let mut score = config.weight_tags * cosine_similarity(user, item);
    if config.use_metrics {
        let norm_views = if max_views > 0.0 { item.view_count / max_views } else { 0.0 };
        let norm_time = if max_time > 0.0 { item.interaction_time / max_time } else { 0.0 };
        score += config.weight_views * norm_views + config.weight_time * norm_time;
    }
    score
}

/// Score every catalog item and rank descending.
///
/// One entry per item. Ties keep catalog order.
pub fn recommend_content_based(
    user: &UserProfile,
    catalog: &Catalog,
    config: &MetricsConfig,
) -> Vec<ScoredEntry> {
    let (max_views, max_time) = catalog.metric_maxima();

    let mut recs: Vec<ScoredEntry> = catalog
        .items()
        .par_iter()
        .map(|item| {
            ScoredEntry::new(
                item.id.clone(),
                compute_item_score(user, item, config, max_views, max_time),
            )
        })
        .collect();

    sort_by_score_desc(&mut recs);
    debug!(
        items = catalog.len(),
        max_views, max_time, "content scoring complete"
    );
    recs
}
