//! End-to-end recommendation run.
//!
//! catalog + profile → content scores
//! peers             → collaborative scores
//! both              → blended ranking → diversified final list

use rand::Rng;
use tracing::{debug, info_span};

use crate::blender::combine_recommendations;
use crate::collaborative::recommend_collaborative;
use crate::config::PipelineConfig;
use crate::content_scorer::recommend_content_based;
use crate::diversifier::randomized_recommendations;
use crate::model::{Catalog, MetricsConfig, Peer, ScoredEntry, UserProfile};

/// Validated inputs of one recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationRequest {
    pub user: UserProfile,
    pub catalog: Catalog,
    pub peers: Vec<Peer>,
    pub metrics: MetricsConfig,
    pub num_recommendations: i64,
    pub random_factor: f64,
}

/// Run all four stages for a single request.
pub fn recommend<R: Rng + ?Sized>(
    request: &RecommendationRequest,
    config: &PipelineConfig,
    rng: &mut R,
) -> Vec<ScoredEntry> {
    let span = info_span!(
        "recommend",
        items = request.catalog.len(),
        peers = request.peers.len(),
        n = request.num_recommendations
    );
    let _enter = span.enter();

    let content = recommend_content_based(&request.user, &request.catalog, &request.metrics);
    let collaborative = recommend_collaborative(&request.peers);
    let blended = combine_recommendations(&content, &collaborative, config.blend);
    let result = randomized_recommendations(
        &blended,
        request.num_recommendations,
        request.random_factor,
        config.diversify,
        rng,
    );

    debug!(returned = result.len(), "recommendation complete");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diversifier::DiversifyOptions;
    use crate::model::{Item, Tag};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request(n: i64, random_factor: f64) -> RecommendationRequest {
        RecommendationRequest {
            user: UserProfile::new(vec![Tag::new("scifi", 1.0)]),
            catalog: Catalog::new(vec![
                Item::new("A", vec![Tag::new("scifi", 1.0)], 100.0, 50.0),
                Item::new("B", vec![Tag::new("fantasy", 1.0)], 10.0, 5.0),
            ])
            .unwrap(),
            peers: vec![
                Peer::new("u1", 0.8, vec!["X".into(), "Y".into()]),
                Peer::new("u2", 0.3, vec!["Y".into()]),
            ],
            metrics: MetricsConfig {
                use_metrics: true,
                weight_views: 0.1,
                weight_time: 0.1,
                weight_tags: 1.0,
            },
            num_recommendations: n,
            random_factor,
        }
    }

    #[test]
    fn test_deterministic_full_ranking() {
        let config = PipelineConfig {
            diversify: DiversifyOptions {
                shuffle_output: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let out = recommend(&request(4, 0.0), &config, &mut StdRng::seed_from_u64(0));

        // A = 0.6, Y = 0.55, X = 0.4, B = 0.01
        let ids: Vec<&str> = out.iter().map(|e| e.item_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "Y", "X", "B"]);
        assert!((out[0].score - 0.6).abs() < 1e-9);
        assert!((out[1].score - 0.55).abs() < 1e-9);
        assert!((out[3].score - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_zero_requested() {
        let out = recommend(&request(0, 0.2), &PipelineConfig::default(), &mut StdRng::seed_from_u64(0));
        assert!(out.is_empty());
    }
}
