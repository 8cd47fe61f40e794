//! Hybrid recommendation pipeline.
//!
//! Two independent signal sources are blended and then diversified:
//!   - similarity: tag-vector cosine similarity (user profile vs item)
//!   - content_scorer: similarity + optional normalized views/engagement
//!   - collaborative: peer similarity summed over liked items
//!   - blender: weighted merge of both rankings by item id
//!   - diversifier: top slice mixed with a seeded random share
//!
//! Around the core:
//!   - protocol: sectioned text input, JSON output
//!   - config: TOML pipeline settings (blend weights, random pool, seed)
//!   - python: pyo3 bindings (feature `python`)
//!
//! Build: `cargo build --release` (CLI), `maturin develop --release --features python`
//! Usage in Python: `import hybrid_rec`

pub mod blender;
pub mod collaborative;
pub mod config;
pub mod content_scorer;
pub mod diversifier;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod protocol;
pub mod similarity;

#[cfg(feature = "python")]
mod python;

pub use blender::{combine_recommendations, BlendWeights};
pub use collaborative::recommend_collaborative;
pub use config::PipelineConfig;
pub use content_scorer::{compute_item_score, recommend_content_based};
pub use diversifier::{randomized_recommendations, DiversifyOptions, RandomPool};
pub use error::{RecError, Result};
pub use model::{Catalog, Item, MetricsConfig, Peer, ScoredEntry, Tag, UserProfile};
pub use pipeline::{recommend, RecommendationRequest};
pub use protocol::{parse_request, to_json, write_json};
pub use similarity::cosine_similarity;
