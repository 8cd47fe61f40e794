//! Pipeline configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! seed = 42
//!
//! [blend]
//! content = 0.6
//! collaborative = 0.4
//!
//! [diversify]
//! pool = "tail"
//! shuffle_output = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::blender::BlendWeights;
use crate::diversifier::DiversifyOptions;
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub blend: BlendWeights,
    pub diversify: DiversifyOptions,
    /// Fixed seed for the diversification shuffle. Fresh entropy per run when unset.
    ///
    /// Only the `hybrid-rec` binary reads this to build its generator;
    /// [`crate::pipeline::recommend`] always uses the rng it is given.
    pub seed: Option<u64>,
}

impl PipelineConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }
}
