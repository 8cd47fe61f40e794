use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hybrid_rec::{parse_request, recommend, write_json, PipelineConfig, RandomPool};

/// Rank items for one user from tag similarity and similar users, then diversify.
///
/// Reads the sectioned request (USER_PROFILE, WORKS, SIMILAR_USERS, PARAMS,
/// METRICS_CONFIG) and prints `{"recommendations": [...]}`.
#[derive(Debug, Parser)]
#[command(name = "hybrid-rec", version)]
struct Args {
    /// Request file; stdin when omitted
    #[arg(short, long, env = "HYBRID_REC_INPUT")]
    input: Option<PathBuf>,

    /// TOML pipeline config
    #[arg(short, long, env = "HYBRID_REC_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "HYBRID_REC_CONTENT_WEIGHT")]
    content_weight: Option<f64>,

    #[arg(long, env = "HYBRID_REC_COLLAB_WEIGHT")]
    collab_weight: Option<f64>,

    /// Seed for the diversification shuffle
    #[arg(long, env = "HYBRID_REC_SEED")]
    seed: Option<u64>,

    /// Where the random share is drawn from
    #[arg(long, value_enum, env = "HYBRID_REC_RANDOM_POOL")]
    random_pool: Option<PoolArg>,

    /// Keep the final list in rank order
    #[arg(
        long,
        env = "HYBRID_REC_NO_SHUFFLE",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    no_shuffle: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PoolArg {
    TopSlice,
    Tail,
}

impl From<PoolArg> for RandomPool {
    fn from(arg: PoolArg) -> Self {
        match arg {
            PoolArg::TopSlice => RandomPool::TopSlice,
            PoolArg::Tail => RandomPool::Tail,
        }
    }
}

impl Args {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(w) = self.content_weight {
            config.blend.content = w;
        }
        if let Some(w) = self.collab_weight {
            config.blend.collaborative = w;
        }
        if let Some(pool) = self.random_pool {
            config.diversify.pool = pool.into();
        }
        if self.no_shuffle {
            config.diversify.shuffle_output = false;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.pipeline_config()?;

    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading request {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("reading request from stdin")?;
            buf
        }
    };
    let request = parse_request(&raw).context("parsing request")?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let recommendations = recommend(&request, &config, &mut rng);
    info!(count = recommendations.len(), "writing recommendations");

    write_json(io::stdout().lock(), &recommendations).context("writing output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const NO_SHUFFLE_ENV: &str = "HYBRID_REC_NO_SHUFFLE";

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", contents).unwrap();
        file
    }

    #[test]
    #[serial_test::serial]
    fn test_flags_override_config_file() {
        let file = config_file(
            "seed = 1\n\n[blend]\ncontent = 0.9\ncollaborative = 0.1\n\n[diversify]\npool = \"top-slice\"\nshuffle_output = true\n",
        );
        let path = file.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "hybrid-rec",
            "--config",
            path,
            "--content-weight",
            "2",
            "--random-pool",
            "tail",
            "--seed",
            "5",
            "--no-shuffle",
        ])
        .unwrap();

        let config = args.pipeline_config().unwrap();

        assert_eq!(config.blend.content, 2.0);
        assert_eq!(config.blend.collaborative, 0.1);
        assert_eq!(config.diversify.pool, RandomPool::Tail);
        assert!(!config.diversify.shuffle_output);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    #[serial_test::serial]
    fn test_config_file_values_kept_without_flags() {
        let file = config_file("seed = 3\n\n[blend]\ncontent = 0.7\n");
        let path = file.path().to_str().unwrap();
        let args = Args::try_parse_from(["hybrid-rec", "-c", path]).unwrap();

        let config = args.pipeline_config().unwrap();

        assert_eq!(config.blend.content, 0.7);
        assert_eq!(config.blend.collaborative, 0.5);
        assert_eq!(config.seed, Some(3));
        assert!(config.diversify.shuffle_output);
    }

    #[test]
    #[serial_test::serial]
    fn test_env_var_sets_no_shuffle() {
        for (value, expected) in [("1", true), ("yes", true), ("true", true), ("0", false), ("no", false)] {
            std::env::set_var(NO_SHUFFLE_ENV, value);
            let parsed = Args::try_parse_from(["hybrid-rec"]);
            std::env::remove_var(NO_SHUFFLE_ENV);

            let args = parsed.unwrap();
            assert_eq!(args.no_shuffle, expected, "{}={}", NO_SHUFFLE_ENV, value);
            let config = args.pipeline_config().unwrap();
            assert_eq!(config.diversify.shuffle_output, !expected);
        }
    }
}
