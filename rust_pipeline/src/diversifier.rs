//! Randomized re-ranking of the blended list.
//!
//! Every refresh shows a slightly different mix so the user is not always
//! served the exact same top results:
//!
//!   num_random = floor(n × random_factor)
//!   num_top    = n − num_random
//!   result     = shuffle(top[..num_top] ++ shuffle(pool)[..num_random])
//!
//! The pool the random share is drawn from is configurable, see [`RandomPool`].

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::ScoredEntry;

/// Where the random share of the final list is sampled from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RandomPool {
    /// The guaranteed top slice itself. Sampled entries repeat items that
    /// are already in the result.
    #[default]
    TopSlice,
    /// Entries ranked below the top slice. The result has no repeated ids.
    Tail,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversifyOptions {
    pub pool: RandomPool,
    /// Shuffle the assembled list before returning it.
    pub shuffle_output: bool,
}

impl Default for DiversifyOptions {
    fn default() -> Self {
        DiversifyOptions {
            pool: RandomPool::TopSlice,
            shuffle_output: true,
        }
    }
}

/// Build the final list of at most `num_recommendations` entries.
///
/// Args:
///     ranked: blended ranking, best first
///     num_recommendations: requested length; <= 0 yields an empty list
///     random_factor: share of random picks, clamped to [0, 1] (NaN → 0)
///     options: pool selection and final shuffle switch
///     rng: caller-owned random source, seed it for reproducible output
///
/// A ranked list shorter than requested is returned as is, never padded.
pub fn randomized_recommendations<R: Rng + ?Sized>(
    ranked: &[ScoredEntry],
    num_recommendations: i64,
    random_factor: f64,
    options: DiversifyOptions,
    rng: &mut R,
) -> Vec<ScoredEntry> {
    if num_recommendations <= 0 {
        return Vec::new();
    }
    let n = usize::try_from(num_recommendations).unwrap_or(usize::MAX);

    let factor = if random_factor.is_nan() {
        0.0
    } else {
        random_factor.clamp(0.0, 1.0)
    };
    if factor != random_factor {
        warn!(random_factor, clamped = factor, "random factor outside [0, 1]");
    }

    let num_random = ((n as f64) * factor).floor() as usize;
    let num_top = n - num_random.min(n);
    let top_len = num_top.min(ranked.len());

    let mut result: Vec<ScoredEntry> = ranked[..top_len].to_vec();

    let mut pool: Vec<ScoredEntry> = match options.pool {
        RandomPool::TopSlice => ranked[..top_len].to_vec(),
        RandomPool::Tail => ranked[top_len..].to_vec(),
    };
    pool.shuffle(rng);
    pool.truncate(num_random);
    let sampled = pool.len();
    result.extend(pool);

    if options.shuffle_output {
        result.shuffle(rng);
    }

    debug!(
        requested = n,
        num_top = top_len,
        num_random = sampled,
        pool = ?options.pool,
        "diversification complete"
    );
    result
}
