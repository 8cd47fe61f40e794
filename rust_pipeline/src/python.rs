//! Python bindings (feature `python`).
//!
//! Build: `maturin develop --release --features python`
//! Usage in Python: `import hybrid_rec`
//!
//! Every function works on plain tuples and lists so callers do not need
//! wrapper classes:
//!     tags     → [(name, value), ...]
//!     items    → [(id, tags, view_count, interaction_time), ...]
//!     peers    → [(id, similarity, [liked_item_id, ...]), ...]
//!     rankings → [(item_id, score), ...]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::blender::{self, BlendWeights};
use crate::collaborative;
use crate::content_scorer;
use crate::diversifier::{self, DiversifyOptions, RandomPool};
use crate::error::RecError;
use crate::model::{Catalog, Item, MetricsConfig, Peer, ScoredEntry, Tag, UserProfile};
use crate::similarity;

type PyTags = Vec<(String, f64)>;
type PyRanking = Vec<(String, f64)>;

impl From<RecError> for PyErr {
    fn from(err: RecError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn to_tags(tags: PyTags) -> Vec<Tag> {
    tags.into_iter().map(|(name, value)| Tag { name, value }).collect()
}

fn to_entries(recs: PyRanking) -> Vec<ScoredEntry> {
    recs.into_iter()
        .map(|(item_id, score)| ScoredEntry { item_id, score })
        .collect()
}

fn from_entries(recs: Vec<ScoredEntry>) -> PyRanking {
    recs.into_iter().map(|e| (e.item_id, e.score)).collect()
}

/// Cosine similarity between two tag sets.
///
/// Example:
///     cosine_similarity([("scifi", 1.0)], [("scifi", 1.0)])  # → 1.0
#[pyfunction]
pub fn cosine_similarity(user_tags: PyTags, item_tags: PyTags) -> f64 {
    let user = UserProfile::new(to_tags(user_tags));
    let item = Item::new("", to_tags(item_tags), 0.0, 0.0);
    similarity::cosine_similarity(&user, &item)
}

/// Content-based ranking of a catalog.
///
/// Raises ValueError when two items share an id.
#[pyfunction]
#[pyo3(signature = (user_tags, items, use_metrics=false, weight_views=0.0, weight_time=0.0, weight_tags=1.0))]
pub fn recommend_content_based(
    user_tags: PyTags,
    items: Vec<(String, PyTags, f64, f64)>,
    use_metrics: bool,
    weight_views: f64,
    weight_time: f64,
    weight_tags: f64,
) -> PyResult<PyRanking> {
    let user = UserProfile::new(to_tags(user_tags));
    let catalog = Catalog::new(
        items
            .into_iter()
            .map(|(id, tags, views, time)| Item::new(id, to_tags(tags), views, time))
            .collect(),
    )?;
    let config = MetricsConfig {
        use_metrics,
        weight_views,
        weight_time,
        weight_tags,
    };
    Ok(from_entries(content_scorer::recommend_content_based(&user, &catalog, &config)))
}

/// Peer-based ranking: each liked item scores the sum of its peers' similarities.
#[pyfunction]
pub fn recommend_collaborative(peers: Vec<(String, f64, Vec<String>)>) -> PyRanking {
    let peers: Vec<Peer> = peers
        .into_iter()
        .map(|(id, similarity, liked)| Peer::new(id, similarity, liked))
        .collect();
    from_entries(collaborative::recommend_collaborative(&peers))
}

/// Weighted merge of two rankings (missing side counts as 0).
#[pyfunction]
#[pyo3(signature = (content, collaborative, content_weight=0.5, collab_weight=0.5))]
pub fn combine_recommendations(
    content: PyRanking,
    collaborative: PyRanking,
    content_weight: f64,
    collab_weight: f64,
) -> PyRanking {
    let weights = BlendWeights {
        content: content_weight,
        collaborative: collab_weight,
    };
    from_entries(blender::combine_recommendations(
        &to_entries(content),
        &to_entries(collaborative),
        weights,
    ))
}

/// Mix the top of a ranking with a random share.
///
/// Args:
///     recs: ranking, best first
///     num_recommendations: requested length
///     random_factor: share of random picks in [0, 1]
///     pool: "top-slice" (default) or "tail"
///     shuffle_output: shuffle the final list (default True)
///     seed: fixed seed for reproducible output, fresh entropy when None
#[pyfunction]
#[pyo3(signature = (recs, num_recommendations, random_factor, pool="top-slice", shuffle_output=true, seed=None))]
pub fn randomized_recommendations(
    recs: PyRanking,
    num_recommendations: i64,
    random_factor: f64,
    pool: &str,
    shuffle_output: bool,
    seed: Option<u64>,
) -> PyResult<PyRanking> {
    let pool = match pool {
        "top-slice" | "top" => RandomPool::TopSlice,
        "tail" => RandomPool::Tail,
        other => {
            return Err(PyValueError::new_err(format!(
                "unknown pool `{}`, expected \"top-slice\" or \"tail\"",
                other
            )))
        }
    };
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let options = DiversifyOptions { pool, shuffle_output };
    Ok(from_entries(diversifier::randomized_recommendations(
        &to_entries(recs),
        num_recommendations,
        random_factor,
        options,
        &mut rng,
    )))
}

/// hybrid_rec — content + collaborative recommendation with diversification.
#[pymodule]
fn hybrid_rec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(cosine_similarity, m)?)?;
    m.add_function(wrap_pyfunction!(recommend_content_based, m)?)?;
    m.add_function(wrap_pyfunction!(recommend_collaborative, m)?)?;
    m.add_function(wrap_pyfunction!(combine_recommendations, m)?)?;
    m.add_function(wrap_pyfunction!(randomized_recommendations, m)?)?;
    Ok(())
}
